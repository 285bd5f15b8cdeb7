//! Parsing for the small text formats shared by CLI flags and prompts.

use crate::models::{Limit, MealSlot, Nutrient, SlotCap};

fn parse_number(part: &str) -> Result<Option<f64>, String> {
    let part = part.trim();
    if part.is_empty() {
        return Ok(None);
    }
    part.parse::<f64>()
        .map(Some)
        .map_err(|_| format!("'{}' is not a number", part))
}

/// Parse `min,max`, where either side may be empty (`,80` or `50,`).
pub fn parse_bounds(input: &str) -> Result<Limit, String> {
    let (min, max) = input
        .split_once(',')
        .ok_or_else(|| format!("expected 'min,max', got '{}'", input))?;
    let limit = Limit::new(parse_number(min)?, parse_number(max)?);
    if limit.min.is_none() && limit.max.is_none() {
        return Err("at least one of min and max is required".to_string());
    }
    Ok(limit)
}

/// Parse `min,max` item counts; empty sides fall back to `default`.
pub fn parse_slot_cap(input: &str, default: SlotCap) -> Result<SlotCap, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default);
    }
    let (min, max) = input
        .split_once(',')
        .ok_or_else(|| format!("expected 'min,max', got '{}'", input))?;
    let count = |part: &str, fallback: usize| -> Result<usize, String> {
        let part = part.trim();
        if part.is_empty() {
            Ok(fallback)
        } else {
            part.parse()
                .map_err(|_| format!("'{}' is not a whole number", part))
        }
    };
    let cap = SlotCap::new(count(min, default.min)?, count(max, default.max)?);
    if cap.min > cap.max {
        return Err(format!("minimum {} exceeds maximum {}", cap.min, cap.max));
    }
    Ok(cap)
}

fn split_key(input: &str) -> Result<(&str, &str), String> {
    input
        .split_once('=')
        .ok_or_else(|| format!("expected 'key=value', got '{}'", input))
}

/// `protein=2.5`
pub fn parse_weight(input: &str) -> Result<(Nutrient, f64), String> {
    let (key, value) = split_key(input)?;
    let nutrient: Nutrient = key.parse().map_err(|e| format!("{}", e))?;
    let weight = parse_number(value)?.ok_or_else(|| format!("missing weight for {}", nutrient))?;
    Ok((nutrient, weight))
}

/// `calories=1800,2200`
pub fn parse_limit(input: &str) -> Result<(Nutrient, Limit), String> {
    let (key, value) = split_key(input)?;
    let nutrient: Nutrient = key.parse().map_err(|e| format!("{}", e))?;
    Ok((nutrient, parse_bounds(value)?))
}

/// `snack=0,1`
pub fn parse_slot(input: &str) -> Result<(MealSlot, SlotCap), String> {
    let (key, value) = split_key(input)?;
    let slot: MealSlot = key.parse().map_err(|e| format!("{}", e))?;
    if value.trim().is_empty() {
        return Err(format!("missing item counts for {}", slot));
    }
    Ok((slot, parse_slot_cap(value, SlotCap::new(0, 0))?))
}

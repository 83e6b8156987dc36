const LAKH: u64 = 100_000;
const CRORE: u64 = 10_000_000;

/// Formats a rupee amount the way listings quote it: `₹1.25 Cr`, `₹45.5 L`,
/// or grouped rupees (`₹75,000`) below one lakh.
pub fn format_inr(amount: u64) -> String {
    if amount >= CRORE {
        format!("₹{} Cr", trim_decimal(amount as f64 / CRORE as f64))
    } else if amount >= LAKH {
        format!("₹{} L", trim_decimal(amount as f64 / LAKH as f64))
    } else {
        format!("₹{}", group_indian(amount))
    }
}

pub fn format_inr_range(min: Option<u64>, max: Option<u64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) if min == max => format_inr(min),
        (Some(min), Some(max)) => format!("{} - {}", format_inr(min), format_inr(max)),
        (Some(min), None) => format!("from {}", format_inr(min)),
        (None, Some(max)) => format!("up to {}", format_inr(max)),
        (None, None) => crate::possession::NOT_SPECIFIED.to_string(),
    }
}

fn trim_decimal(value: f64) -> String {
    let fixed = format!("{value:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

// 12,34,567: last three digits, then pairs.
fn group_indian(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

use alloy::primitives::{Address, B256};
use chrono::{DateTime, Utc};

/// Truncate a B256 hash to "0xabcd...ef12" format
pub fn truncate_hash(hash: &B256) -> String {
    let s = format!("{hash}");
    if s.len() > 14 {
        format!("{}...{}", &s[..8], &s[s.len() - 4..])
    } else {
        s
    }
}

/// Truncate an address to "0xabcd...ef12" format
pub fn truncate_address(addr: &Address) -> String {
    let s = format!("{addr}");
    if s.len() > 14 {
        format!("{}...{}", &s[..8], &s[s.len() - 4..])
    } else {
        s
    }
}

/// Format a number with comma separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a Unix timestamp as "Xm ago", "Xh ago", etc.
pub fn format_time_ago(timestamp: u64) -> String {
    let now = Utc::now().timestamp() as u64;
    if timestamp > now {
        return "just now".to_string();
    }
    let diff = now - timestamp;
    if diff < 60 {
        format!("{diff}s ago")
    } else if diff < 3600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86400 {
        format!("{}h ago", diff / 3600)
    } else {
        format!("{}d ago", diff / 86400)
    }
}

/// Format a Unix timestamp as a datetime string
pub fn format_timestamp(timestamp: u64) -> String {
    DateTime::from_timestamp(timestamp as i64, 0)
        .map(|dt| dt.format("%b %d, %Y %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

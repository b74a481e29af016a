//! en-IN currency display: `₹` prefix, no decimals, lakh/crore grouping.

/// Format whole rupees with Indian digit grouping.
///
/// The last three digits form one group and every earlier group has two
/// digits, so 2522880 renders as `₹25,22,880`.
pub fn format_inr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let grouped = group_indian(&digits);

    if amount < 0 {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);

    // leading group is one digit when head has odd length
    let first = head.len() % 2;
    if first == 1 {
        out.push_str(&head[..1]);
    }
    for (i, pair) in head.as_bytes()[first..].chunks(2).enumerate() {
        if i > 0 || first == 1 {
            out.push(',');
        }
        out.push_str(std::str::from_utf8(pair).unwrap_or_default());
    }

    out.push(',');
    out.push_str(tail);
    out
}

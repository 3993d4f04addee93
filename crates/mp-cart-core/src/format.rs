/// Format an amount as Indian rupees: `₹` prefix, lakh/crore digit grouping,
/// two decimals. `1234567.5` renders as `₹12,34,567.50`.
pub fn format_inr(amount: f64) -> String {
    let paise = if amount.is_finite() {
        (amount.abs() * 100.0).round() as u64
    } else {
        0
    };
    let sign = if amount < 0.0 && paise > 0 { "-" } else { "" };

    format!("{sign}₹{}.{:02}", group_indian(paise / 100), paise % 100)
}

fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    groups.push(head);
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

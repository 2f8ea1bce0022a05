/// Cursor and avatar colors handed out to workspace members.
pub const PALETTE: [&str; 10] = [
    "#FF6B6B", // red
    "#4ECDC4", // teal
    "#45B7D1", // blue
    "#FFA07A", // light salmon
    "#98D8C8", // mint
    "#F7DC6F", // yellow
    "#BB8FCE", // purple
    "#85C1E2", // sky blue
    "#F8B739", // orange
    "#52B788", // green
];

/// Hash of a connection id over its UTF-16 code units.
///
/// Each step computes `c + ((h << 5) - h)` where only the shift wraps at
/// 32 bits, so browser clients computing the same hash agree on the value.
pub fn connection_hash(connection_id: &str) -> i64 {
    connection_id.encode_utf16().fold(0i64, |h, c| {
        let shifted = (h as i32).wrapping_shl(5) as i64;
        i64::from(c) + shifted - h
    })
}

/// Palette color for a connection. Pure function of the id.
pub fn color_for(connection_id: &str) -> &'static str {
    let index = connection_hash(connection_id).unsigned_abs() % PALETTE.len() as u64;
    PALETTE[index as usize]
}

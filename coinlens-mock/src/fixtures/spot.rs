/// Latest fixture price per asset id, matching the last day of the default
/// one-year series (solana rounded).
pub fn by_id(id: &str) -> Option<f64> {
    match id {
        "bitcoin" => Some(56_400.0),
        "ethereum" => Some(1_088.0),
        "solana" => Some(180.5),
        "tether" => Some(1.0),
        _ => None,
    }
}

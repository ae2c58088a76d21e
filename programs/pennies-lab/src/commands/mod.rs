//! Subcommand handlers

pub mod play;
pub mod sweep;

use pennies_logic::Strategy;

/// Parse a strategy given on the command line
///
/// Accepted forms:
/// - `random` or `random:<bias>` (bias toward 0, default 0.5)
/// - `wsls`
/// - `memory` or `memory:<window>` (window 0 means the whole history)
pub fn parse_strategy(spec: &str) -> Result<Strategy, String> {
    let (kind, arg) = match spec.split_once(':') {
        Some((kind, arg)) => (kind, Some(arg)),
        None => (spec, None),
    };

    let strategy = match (kind.trim().to_ascii_lowercase().as_str(), arg) {
        ("random", None) => Ok(Strategy::unbiased()),
        ("random", Some(bias)) => {
            let bias: f64 = bias
                .trim()
                .parse()
                .map_err(|_| format!("bias '{}' is not a number", bias))?;
            Strategy::random(bias)
        }
        ("wsls", None) => Ok(Strategy::WinStayLoseSwitch),
        ("memory", None) => Ok(Strategy::perfect_memory()),
        ("memory", Some(window)) => {
            let window: i64 = window
                .trim()
                .parse()
                .map_err(|_| format!("window '{}' is not an integer", window))?;
            Strategy::perfect_memory_window(Some(window))
        }
        _ => {
            return Err(format!(
                "unknown strategy '{}' (expected random[:bias], wsls or memory[:window])",
                spec
            ))
        }
    };

    strategy.map_err(|e| e.to_string())
}

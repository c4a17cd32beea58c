use jiff::{SignedDuration, Span, SpanRelativeTo};

/// Parses a time limit given as an ISO 8601 or friendly duration (`PT30S`, `30s`, `1m 30s`)
/// or as a plain number of seconds.
pub fn parse_duration(input: &str) -> Result<SignedDuration, String> {
    let input = input.trim();

    let duration = if let Ok(duration) = input.parse::<SignedDuration>() {
        duration
    } else if let Ok(duration) = input
        .parse::<Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        duration
    } else if let Ok(seconds) = input.parse::<f64>() {
        SignedDuration::try_from_secs_f64(seconds).map_err(|error| error.to_string())?
    } else {
        return Err(format!("invalid duration '{input}'"));
    };

    if duration.is_negative() {
        return Err(format!("duration '{input}' cannot be negative"));
    }

    Ok(duration)
}

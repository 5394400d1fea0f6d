use crate::domain::{FormatResult, TransError, TransitionPair};

/// Pairs a flat `lower upper lower upper ...` level list into transitions,
/// keeping input order. The whole list is validated before anything is
/// returned.
pub fn parse_transition_pairs<I, S>(tokens: I) -> FormatResult<Vec<TransitionPair>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens = tokens
        .into_iter()
        .map(|token| token.as_ref().to_string())
        .collect::<Vec<_>>();

    if tokens.len() % 2 != 0 {
        return Err(TransError::format(
            "INPUT.ODD_LEVEL_COUNT",
            format!(
                "odd number of levels ({}); transitions need a lower and an upper level",
                tokens.len()
            ),
        ));
    }

    tokens
        .chunks_exact(2)
        .map(|pair| {
            let lower = parse_level(&pair[0])?;
            let upper = parse_level(&pair[1])?;
            Ok(TransitionPair::new(
                pair[0].clone(),
                pair[1].clone(),
                lower,
                upper,
            ))
        })
        .collect()
}

fn parse_level(token: &str) -> FormatResult<u32> {
    let value = token.trim().parse::<i64>().map_err(|_| {
        TransError::format(
            "INPUT.LEVEL_TOKEN",
            format!("level '{}' is not an integer", token),
        )
    })?;

    u32::try_from(value)
        .ok()
        .filter(|level| *level > 0)
        .ok_or_else(|| {
            TransError::format(
                "INPUT.LEVEL_RANGE",
                format!("level '{}' must be a positive integer", token),
            )
        })
}

use crate::models::User;

/// Extracts `(token, user)` from the OAuth redirect fragment
/// (`#token=...&email=...`).
///
/// Decoding follows `URLSearchParams`: `+` is a space, values are
/// percent-decoded, and the first occurrence of a key wins. Missing, empty,
/// or undecodable values yield `None`.
pub(crate) fn parse_callback_fragment(fragment: &str) -> Option<(String, User)> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

    let token = fragment_param(fragment, "token")?;
    let email = fragment_param(fragment, "email")?;

    Some((token, User { email }))
}

fn fragment_param(fragment: &str, name: &str) -> Option<String> {
    let raw = fragment
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key).as_deref() == Some(name)).then_some(value)
        })?;

    decode_component(raw).filter(|v| !v.is_empty())
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|v| v.into_owned())
}

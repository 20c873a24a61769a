use url::Url;

use super::views::ViewId;
use super::vocabulary::resolve_view;

pub const DEFAULT_QUERY_PARAM: &str = "section";

/// Accepts an absolute URL or anything relative to `base` ("?section=team").
pub fn parse_location(raw: &str, base: &Url) -> Result<Url, url::ParseError> {
    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => base.join(raw),
        Err(err) => Err(err),
    }
}

/// Reads the view from the query parameter. Shared links may carry any
/// phrase the resolver accepts; the first value of the parameter wins.
pub fn view_from_location(location: &Url, param: &str) -> Option<ViewId> {
    location
        .query_pairs()
        .find(|(key, _)| key == param)
        .and_then(|(_, value)| resolve_view(&value))
}

/// Copy of `location` with the parameter set to `view`; other query pairs
/// keep their order.
pub fn with_view(location: &Url, param: &str, view: ViewId) -> Url {
    let retained: Vec<(String, String)> = location
        .query_pairs()
        .filter(|(key, _)| key != param)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut next = location.clone();
    {
        let mut pairs = next.query_pairs_mut();
        pairs.clear();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(param, view.as_str());
    }
    next
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::views::ALL_VIEWS;

    fn base() -> Url {
        Url::parse("https://app.local/employer").unwrap()
    }

    #[test]
    fn every_view_round_trips_through_the_location() {
        for view in ALL_VIEWS {
            let encoded = with_view(&base(), DEFAULT_QUERY_PARAM, view);
            assert_eq!(view_from_location(&encoded, DEFAULT_QUERY_PARAM), Some(view));
        }
    }

    #[test]
    fn encoding_replaces_previous_value_and_keeps_other_params() {
        let start = Url::parse("https://app.local/employer?tab=open&section=quotes").unwrap();
        let next = with_view(&start, DEFAULT_QUERY_PARAM, ViewId::Team);
        assert_eq!(next.as_str(), "https://app.local/employer?tab=open&section=team");
    }

    #[test]
    fn alias_in_shared_link_resolves() {
        let link = Url::parse("https://app.local/employer?section=talent-pool").unwrap();
        assert_eq!(
            view_from_location(&link, DEFAULT_QUERY_PARAM),
            Some(ViewId::TalentPool)
        );
    }

    #[test]
    fn missing_or_unknown_section_is_none() {
        assert_eq!(view_from_location(&base(), DEFAULT_QUERY_PARAM), None);
        let bogus = Url::parse("https://app.local/employer?section=xyzzy").unwrap();
        assert_eq!(view_from_location(&bogus, DEFAULT_QUERY_PARAM), None);
    }

    #[test]
    fn relative_locations_join_the_base() {
        let url = parse_location("?section=fleet", &base()).unwrap();
        assert_eq!(url.as_str(), "https://app.local/employer?section=fleet");
        assert!(parse_location("http://[bad", &base()).is_err());
    }

    #[test]
    fn custom_param_name_is_honoured() {
        let encoded = with_view(&base(), "view", ViewId::Rams);
        assert_eq!(encoded.query(), Some("view=rams"));
        assert_eq!(view_from_location(&encoded, "view"), Some(ViewId::Rams));
    }
}

//! Client-side narrowing of a result set by author and publication day.

use crate::model::Article;

/// Active filters. `None` (or an empty string passed to [`Filters::new`])
/// means the predicate lets everything through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filters {
    pub author: Option<String>,
    pub date: Option<String>, // YYYY-MM-DD
}

impl Filters {
    pub fn new(author: impl Into<String>, date: impl Into<String>) -> Self {
        let some = |s: String| (!s.is_empty()).then_some(s);
        Self {
            author: some(author.into()),
            date: some(date.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.date.is_none()
    }

    /// Both predicates must hold. Author is exact, case-sensitive byline
    /// equality; date compares the UTC calendar day. Articles without a
    /// parseable date never match a date filter.
    pub fn matches(&self, article: &Article) -> bool {
        let author_ok = match self.author.as_deref() {
            None | Some("") => true,
            Some(author) => article.byline.as_deref() == Some(author),
        };
        let date_ok = match self.date.as_deref() {
            None | Some("") => true,
            Some(day) => article.day().as_deref() == Some(day),
        };
        author_ok && date_ok
    }
}

/// Stable filter: output keeps the input order.
pub fn filter<'a, I>(articles: I, filters: &Filters) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    articles.into_iter().filter(|a| filters.matches(a)).collect()
}

/// Distinct non-empty bylines in first-seen order.
pub fn author_options(articles: &[Article]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for byline in articles.iter().filter_map(|a| a.byline.as_deref()) {
        if !byline.is_empty() && !out.iter().any(|seen| seen == byline) {
            out.push(byline.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, byline: Option<&str>, pub_date: Option<&str>) -> Article {
        Article {
            id: id.into(),
            headline: format!("Headline {id}"),
            byline: byline.map(Into::into),
            pub_date: pub_date.map(Into::into),
            snippet: None,
            lead_paragraph: None,
            url: format!("https://example.com/{id}"),
        }
    }

    fn ids(list: &[&Article]) -> Vec<String> {
        list.iter().map(|a| a.id.clone()).collect()
    }

    fn sample() -> Vec<Article> {
        vec![
            article("1", Some("A"), Some("2025-07-19T00:00:00Z")),
            article("2", Some("B"), Some("2025-07-19T12:00:00Z")),
            article("3", Some("A"), Some("2025-07-20T08:00:00+0000")),
            article("4", None, None),
            article("5", Some("A"), Some("garbage")),
        ]
    }

    #[test]
    fn empty_filters_return_input_unchanged() {
        let list = sample();
        let out = filter(&list, &Filters::new("", ""));
        assert_eq!(out.len(), list.len());
        assert!(out.iter().zip(&list).all(|(a, b)| *a == b));
        assert!(Filters::new("", "").is_empty());
        assert_eq!(Filters::new("", ""), Filters::default());
    }

    #[test]
    fn author_filter_is_exact() {
        let list = vec![article("a", Some("A"), None), article("b", Some("B"), None)];
        let out = filter(&list, &Filters::new("A", ""));
        assert_eq!(ids(&out), ["a"]);

        assert!(filter(&list, &Filters::new("a", "")).is_empty());
        assert!(filter(&list, &Filters::new("A ", "")).is_empty());
    }

    #[test]
    fn date_filter_matches_calendar_day() {
        let list = vec![article("x", None, Some("2025-07-19T00:00:00Z"))];
        assert_eq!(filter(&list, &Filters::new("", "2025-07-19")).len(), 1);
        assert!(filter(&list, &Filters::new("", "2025-07-20")).is_empty());
    }

    #[test]
    fn missing_or_bad_date_never_matches_date_filter() {
        let list = sample();
        let out = filter(&list, &Filters::new("", "2025-07-19"));
        assert_eq!(ids(&out), ["1", "2"]);
    }

    #[test]
    fn predicates_are_conjunctive_and_order_is_kept() {
        let list = sample();
        let out = filter(&list, &Filters::new("A", "2025-07-19"));
        assert_eq!(ids(&out), ["1"]);

        let out = filter(&list, &Filters::new("A", ""));
        assert_eq!(ids(&out), ["1", "3", "5"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let list = sample();
        for f in [
            Filters::new("A", ""),
            Filters::new("", "2025-07-19"),
            Filters::new("B", "2025-07-19"),
        ] {
            let once = filter(&list, &f);
            let twice = filter(once.iter().copied(), &f);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn membership_matches_predicate_definition() {
        let list = sample();
        let authors = ["", "A", "B", "C"];
        let dates = ["", "2025-07-19", "2025-07-20", "2024-01-01"];
        for author in authors {
            for date in dates {
                let f = Filters::new(author, date);
                let out = filter(&list, &f);
                for a in &list {
                    let expected = (author.is_empty() || a.byline.as_deref() == Some(author))
                        && (date.is_empty() || a.day().as_deref() == Some(date));
                    assert_eq!(out.contains(&a), expected, "{author:?}/{date:?} on {}", a.id);
                }
            }
        }
    }

    #[test]
    fn author_options_are_distinct_and_non_empty() {
        let mut list = sample();
        list.push(article("6", Some(""), None));
        assert_eq!(author_options(&list), ["A", "B"]);
        assert!(author_options(&[]).is_empty());
    }
}

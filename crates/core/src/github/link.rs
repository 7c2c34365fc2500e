//! `Link` header pagination support
//!
//! Paginated endpoints advertise further pages through a header such as
//! `Link: <https://api.github.com/x?page=2>; rel="next", <...>; rel="last"`.

/// Path and query of the `rel="next"` entry, if the header has one.
pub(crate) fn next_page_path(link_header: &str) -> Option<String> {
    let entry = link_header
        .split(',')
        .find(|entry| entry.contains(r#"rel="next""#))?;

    let start = entry.find('<')?;
    let end = entry.find('>')?;
    let url = reqwest::Url::parse(entry.get(start + 1..end)?).ok()?;

    let mut path = url.path().to_string();
    if let Some(query) = url.query() {
        path.push('?');
        path.push_str(query);
    }
    Some(path)
}

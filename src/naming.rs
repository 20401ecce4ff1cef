//! Output file naming
//!
//! Files are named after the number of successful downloads so far, zero-padded to
//! three digits, followed by the extension of the media URL: `000.jpg`, `001.png`, ...

/// Width of the zero-padded counter in file names
pub const COUNTER_WIDTH: usize = 3;

/// Extension of the media URL's last path segment, including the leading dot
///
/// The query string and fragment are ignored. A dot that only starts the segment
/// (`.hidden`) is not an extension. Returns an empty string when there is none.
///
/// ```
/// use booru_dl::naming::url_extension;
///
/// assert_eq!(url_extension("https://safebooru.org/images/1/abc.jpg?123"), ".jpg");
/// assert_eq!(url_extension("https://example.com/download"), "");
/// ```
pub fn url_extension(url: &str) -> String {
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Relative or malformed URL: use the text up to any query or fragment
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };

    let segment = path.rsplit('/').next().unwrap_or_default();
    split_extension(segment).to_string()
}

fn split_extension(segment: &str) -> &str {
    let Some(dot) = segment.rfind('.') else {
        return "";
    };
    if segment[..dot].chars().all(|c| c == '.') {
        return "";
    }
    &segment[dot..]
}

/// File name for the download written at position `counter`
pub fn sequential_file_name(counter: usize, extension: &str) -> String {
    format!("{counter:0width$}{extension}", width = COUNTER_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_from_plain_urls() {
        assert_eq!(url_extension("http://x/a.png"), ".png");
        assert_eq!(url_extension("http://x/b.jpg"), ".jpg");
        assert_eq!(
            url_extension("https://safebooru.org//images/4321/0badc0de.jpeg"),
            ".jpeg"
        );
    }

    #[test]
    fn extension_uses_last_dot_only() {
        assert_eq!(url_extension("http://x/archive.tar.gz"), ".gz");
        assert_eq!(url_extension("http://x.example.com/v1.2/file"), "");
    }

    #[test]
    fn extension_ignores_query_and_fragment() {
        assert_eq!(url_extension("http://x/a.webm?v=1.5"), ".webm");
        assert_eq!(url_extension("http://x/a.gif#frame.2"), ".gif");
    }

    #[test]
    fn extension_empty_when_absent() {
        assert_eq!(url_extension("http://x/"), "");
        assert_eq!(url_extension("http://x"), "");
        assert_eq!(url_extension("http://x/noext"), "");
    }

    #[test]
    fn leading_dots_are_not_an_extension() {
        assert_eq!(url_extension("http://x/.hidden"), "");
        assert_eq!(url_extension("http://x/..hidden"), "");
        assert_eq!(url_extension("http://x/.hidden.png"), ".png");
    }

    #[test]
    fn trailing_dot_is_kept() {
        assert_eq!(url_extension("http://x/name."), ".");
    }

    #[test]
    fn malformed_url_falls_back_to_raw_text() {
        assert_eq!(url_extension("images/a.png?x=1"), ".png");
        assert_eq!(url_extension("not a url"), "");
    }

    #[test]
    fn file_names_are_zero_padded() {
        assert_eq!(sequential_file_name(0, ".png"), "000.png");
        assert_eq!(sequential_file_name(7, ".jpg"), "007.jpg");
        assert_eq!(sequential_file_name(300, ""), "300");
        assert_eq!(sequential_file_name(1000, ".gif"), "1000.gif");
    }
}

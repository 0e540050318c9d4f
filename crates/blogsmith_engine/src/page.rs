//! Rendering of the full post page and the landing-page card snippet.
//!
//! Generated text is treated as untrusted input: every value is passed
//! through [`escape_html`] before it is placed into markup.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("placeholder token {token:?} not found in template")]
    PlaceholderMissing { token: String },
}

/// Escape HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render the full post page.
///
/// The body is escaped, then newlines become `<br />` line breaks so the
/// generated paragraphs keep their shape without any further markup.
pub fn render_post(title: &str, cover_file_name: &str, body: &str) -> String {
    let title = escape_html(title);
    let cover = escape_html(cover_file_name);
    let body = escape_html(body).replace('\n', "<br />\n");
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <img src=\"{cover}\" alt=\"Cover Image\">\n\
         <h1>{title}</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n"
    )
}

/// Render the card snippet embedded into the landing page.
pub fn render_card(image_name: &str, title: &str, tags: &str, link: &str) -> String {
    let image = escape_html(image_name);
    let title = escape_html(title);
    let tags = escape_html(tags);
    let link = escape_html(link);
    format!(
        "<img src=\"{image}\" alt=\"Cover Image\" class=\"img-fluid\">\n\
         <h2>{title}</h2>\n\
         <p>{tags}</p>\n\
         <a href=\"{link}\" class=\"btn btn-primary\">Read more</a>\n"
    )
}

/// Replace the last occurrence of `token` in `template` with `fragment`.
///
/// Card text appended on earlier runs may itself contain the token
/// literally; the live marker is always the final occurrence.
///
/// A template without the token is an error, never a silent no-op: the
/// caller must be able to tell "appended" from "nothing happened".
pub fn substitute_placeholder(
    template: &str,
    token: &str,
    fragment: &str,
) -> Result<String, PageError> {
    let Some(idx) = template.rfind(token) else {
        return Err(PageError::PlaceholderMissing {
            token: token.to_string(),
        });
    };
    let mut out = String::with_capacity(template.len() + fragment.len());
    out.push_str(&template[..idx]);
    out.push_str(fragment);
    out.push_str(&template[idx + token.len()..]);
    Ok(out)
}

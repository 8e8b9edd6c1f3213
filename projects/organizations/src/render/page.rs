use std::fmt::Write;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::db::organization::models::Organization;

#[derive(Debug, Error)]
pub enum RenderPageError {
    #[error("WritePage: {source}")]
    WritePage {
        #[from]
        source: std::fmt::Error,
    },
}

/// RFC 1123 timestamp, e.g. `Mon, 19 Oct 2026 08:30:00 UTC`.
pub fn format_sync_time(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S UTC").to_string()
}

/// Renders the organization list. `organizations` is expected in display order.
pub fn render_organizations_page(
    organizations: &[Organization],
    generated_at: DateTime<Utc>,
) -> Result<String, RenderPageError> {
    let mut html = String::with_capacity(1024 + organizations.len() * 160);

    write!(
        html,
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>GSoC Organizations</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2rem; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #ddd; padding: 0.4rem; text-align: left; }}\n\
         th {{ background: #f4f4f4; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <h1>GSoC Organizations</h1>\n\
         <p>Page generated at {}. <a href=\"/sync\">Sync now</a></p>\n",
        escape_html(&format_sync_time(generated_at)),
    )?;

    if organizations.is_empty() {
        html.push_str("<p>No organizations stored yet. Run a sync to fetch them.</p>\n");
    } else {
        writeln!(html, "<p>{} organizations</p>", organizations.len())?;
        html.push_str(
            "<table>\n\
             <thead><tr><th>Year</th><th>Name</th><th>Description</th><th>URL</th></tr></thead>\n\
             <tbody>\n",
        );
        for org in organizations {
            write!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>",
                org.year,
                escape_html(&org.name),
                escape_html(&org.description),
            )?;
            if !org.url.is_empty() {
                let url = escape_html(&org.url);
                write!(html, "<a href=\"{url}\">{url}</a>")?;
            }
            html.push_str("</td></tr>\n");
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str("</body>\n</html>\n");
    Ok(html)
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

//! HTML pages: landing form, analysis results, error.

use commit_classifier::Category;
use std::fmt::Write;

use crate::types::AnalysisResult;

const STYLE: &str = "body{font-family:sans-serif;max-width:52rem;margin:2rem auto;padding:0 1rem}\
table{border-collapse:collapse;width:100%}th,td{border:1px solid #ccc;padding:.4rem .6rem;text-align:right}\
th:first-child,td:first-child{text-align:left;font-family:monospace}.error{color:#a00}";

fn page(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
     <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
    title = escape(title),
  )
}

fn form() -> &'static str {
  "<form method=\"post\" action=\"/analyze\">\n\
   <input type=\"text\" name=\"repoUrl\" placeholder=\"https://github.com/owner/repo\" size=\"48\" required>\n\
   <button type=\"submit\">Analyze</button>\n</form>\n"
}

pub fn landing_page() -> String {
  let body = format!(
    "<h1>Sherlock</h1>\n<p>Classify the commit history of a GitHub repository's files \
     into new features, refactors and fixes.</p>\n{}",
    form()
  );
  page("Sherlock", &body)
}

pub fn results_page(result: &AnalysisResult) -> String {
  let mut body = String::new();
  let _ = writeln!(
    body,
    "<h1>{}</h1>\n<p>Source: <a href=\"{url}\">{url}</a> at <code>{}</code></p>",
    escape(&result.repository.to_string()),
    escape(&result.git_ref),
    url = escape(&result.repo_url),
  );

  if result.files.is_empty() {
    body.push_str("<p>No files found.</p>\n");
  } else {
    body.push_str("<table>\n<tr><th>Path</th>");
    for c in Category::ALL {
      let _ = write!(body, "<th>{}</th>", escape(c.label()));
    }
    body.push_str("<th>Total</th></tr>\n");
    for file in &result.files {
      let _ = write!(body, "<tr><td>{}</td>", escape(&file.path));
      for n in file.counts.as_array() {
        let _ = write!(body, "<td>{}</td>", n);
      }
      let _ = writeln!(body, "<td>{}</td></tr>", file.counts.total());
    }
    body.push_str("</table>\n");
  }

  body.push_str("<h2>Analyze another</h2>\n");
  body.push_str(form());
  page(&format!("Sherlock: {}", result.repository), &body)
}

pub fn error_page(message: &str) -> String {
  let body = format!(
    "<h1>Analysis failed</h1>\n<p class=\"error\">{}</p>\n{}",
    escape(message),
    form()
  );
  page("Sherlock: error", &body)
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}

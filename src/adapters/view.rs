use crate::domain::ports::Renderer;
use crate::utils::error::{AnnuaireError, Result};
use serde_json::Value;
use std::fmt::Write;

pub const BASE_VIEW: &str = "base";
pub const LISTING_VIEW: &str = "annuaire/liste_personnes";
pub const ERROR_VIEW: &str = "error";

/// Server-side HTML for the three pages of the site.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    site_title: String,
}

impl HtmlRenderer {
    pub fn new(site_title: impl Into<String>) -> Self {
        Self {
            site_title: site_title.into(),
        }
    }

    fn layout(&self, title: &str, body: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n<meta charset=\"UTF-8\">\n\
             <title>{title} | {site}</title>\n</head>\n<body>\n\
             <nav><a href=\"/\">Accueil</a> | <a href=\"/annuaire\">Annuaire</a></nav>\n\
             <main>\n{body}</main>\n</body>\n</html>\n",
            title = escape(title),
            site = escape(&self.site_title),
            body = body,
        )
    }

    fn base(&self) -> String {
        let body = format!(
            "<h1>{}</h1>\n<p>Bienvenue. Consultez <a href=\"/annuaire\">l'annuaire</a>.</p>\n",
            escape(&self.site_title)
        );
        self.layout("Accueil", &body)
    }

    fn listing(&self, bindings: &Value) -> Result<String> {
        let personnes = bindings
            .get("personnes")
            .and_then(Value::as_array)
            .ok_or_else(|| AnnuaireError::render(LISTING_VIEW, "missing 'personnes' array"))?;

        let mut body = String::from("<h1>Annuaire</h1>\n");
        if personnes.is_empty() {
            body.push_str("<p class=\"empty\">Aucune personne dans l'annuaire.</p>\n");
            return Ok(self.layout("Annuaire", &body));
        }

        body.push_str("<table>\n<thead><tr><th>Prénom</th><th>Nom</th></tr></thead>\n<tbody>\n");
        for personne in personnes {
            let first = text_field(personne, "firstName")?;
            let last = text_field(personne, "lastName")?;
            // Writing into a String cannot fail.
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape(first),
                escape(last)
            );
        }
        body.push_str("</tbody>\n</table>\n");
        Ok(self.layout("Annuaire", &body))
    }

    fn error(&self, bindings: &Value) -> String {
        let status = bindings.get("status").and_then(Value::as_u64).unwrap_or(500);
        let message = bindings
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Une erreur est survenue.");
        let body = format!("<h1>Erreur {status}</h1>\n<p>{}</p>\n", escape(message));
        self.layout("Erreur", &body)
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new("Annuaire")
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, view: &str, bindings: &Value) -> Result<Vec<u8>> {
        let page = match view {
            BASE_VIEW => self.base(),
            LISTING_VIEW => self.listing(bindings)?,
            ERROR_VIEW => self.error(bindings),
            other => return Err(AnnuaireError::render(other, "unknown view")),
        };
        Ok(page.into_bytes())
    }
}

fn text_field<'a>(value: &'a Value, key: &str) -> Result<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| AnnuaireError::render(LISTING_VIEW, format!("record without '{key}'")))
}

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

//! Standalone HTML preview of a post.
//!
//! The page carries the resolved theme as inline styles and CSS variables,
//! so it renders the same with no stylesheet. Category ids that no longer
//! resolve are shown as `Unknown`.

use crate::config::format_date;
use crate::markup::{escape_html, render};
use crate::model::{Category, Post, Theme};
use std::fmt::Write;

pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Resolves category ids to display names, in the post's order.
pub fn category_names(post: &Post, categories: &[Category]) -> Vec<String> {
    post.categories
        .iter()
        .map(|id| {
            categories
                .iter()
                .find(|c| &c.id == id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
        })
        .collect()
}

pub fn render_page(
    post: &Post,
    theme: Option<&Theme>,
    categories: &[Category],
    date_format: &str,
) -> String {
    let title = escape_html(&post.title);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n");
    let _ = writeln!(html, "<title>{}</title>", title);
    html.push_str("</head>\n");

    match theme {
        Some(theme) => {
            let _ = writeln!(
                html,
                "<body style=\"margin:0;background-color:{bg};color:{text};font-family:{font};--primary-color:{primary};--secondary-color:{secondary}\">",
                bg = escape_html(&theme.background_color),
                text = escape_html(&theme.text_color),
                font = escape_html(&theme.font_family),
                primary = escape_html(&theme.primary_color),
                secondary = escape_html(&theme.secondary_color),
            );
        }
        None => html.push_str("<body>\n"),
    }

    html.push_str("<article class=\"blog-preview\">\n");

    if let Some(cover) = post.cover_image.as_deref().filter(|c| !c.trim().is_empty()) {
        let _ = writeln!(
            html,
            "<div class=\"cover-image\"><img src=\"{}\" alt=\"{}\" style=\"width:100%;height:300px;object-fit:cover\" /></div>",
            escape_html(cover),
            title
        );
    }

    html.push_str("<div class=\"content\">\n");
    match theme {
        Some(theme) => {
            let _ = writeln!(
                html,
                "<h1 style=\"color:{}\">{}</h1>",
                escape_html(&theme.primary_color),
                title
            );
        }
        None => {
            let _ = writeln!(html, "<h1>{}</h1>", title);
        }
    }

    html.push_str("<div class=\"meta\">\n");
    let _ = writeln!(
        html,
        "<span>Published: {}</span>",
        format_date(post.publish_date(), date_format)
    );
    let _ = writeln!(
        html,
        "<span>Updated: {}</span>",
        format_date(post.updated_at, date_format)
    );
    let names = category_names(post, categories);
    if !names.is_empty() {
        let _ = writeln!(html, "<span>{}</span>", escape_html(&names.join(", ")));
    }
    if !post.tags.is_empty() {
        let _ = writeln!(html, "<span>{}</span>", escape_html(&post.tags.join(", ")));
    }
    html.push_str("</div>\n");

    let _ = writeln!(
        html,
        "<div class=\"blog-content\">{}</div>",
        render(&post.content)
    );
    html.push_str("</div>\n</article>\n</body>\n</html>\n");
    html
}

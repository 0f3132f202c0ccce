use blogdesk::api::{CmdMessage, MessageLevel};
use blogdesk::config::format_date;
use blogdesk::index::Indexed;
use blogdesk::model::{Category, Post, Theme};
use blogdesk::preview::category_names;
use chrono::{DateTime, Utc};
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const STATUS_WIDTH: usize = 8;
const ACTIVE_MARKER: &str = "*";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_posts(posts: &[Indexed<Post>], categories: &[Category]) {
    if posts.is_empty() {
        println!("No blog posts found.");
        return;
    }

    for entry in posts {
        let post = &entry.record;
        let idx_str = format!("{:>3}. ", entry.index);
        let status = if post.published { "live" } else { "draft" };
        let status_str = format!("{:<width$}", status, width = STATUS_WIDTH);

        let names = category_names(post, categories);
        let label = if names.is_empty() {
            post.title.clone()
        } else {
            format!("{} [{}]", post.title, names.join(", "))
        };

        let fixed_width = idx_str.width() + STATUS_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let label_display = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label_display.width());

        let status_colored = if post.published {
            status_str.green()
        } else {
            status_str.yellow()
        };

        println!(
            "{}{}{}{}{}",
            idx_str,
            status_colored,
            label_display,
            " ".repeat(padding),
            format_time_ago(post.updated_at).dimmed()
        );
    }
}

pub(super) fn print_full_posts(posts: &[Indexed<Post>], categories: &[Category], date_format: &str) {
    for (i, entry) in posts.iter().enumerate() {
        let post = &entry.record;
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{} {}", entry.index.to_string().yellow(), post.title.bold());
        let state = if post.published { "Published" } else { "Draft" };
        println!(
            "{}",
            format!(
                "{} {} | Updated {} | {}",
                state,
                format_date(post.publish_date(), date_format),
                format_date(post.updated_at, date_format),
                post.id
            )
            .dimmed()
        );
        let names = category_names(post, categories);
        if !names.is_empty() {
            println!("Categories: {}", names.join(", "));
        }
        if !post.tags.is_empty() {
            println!("Tags: {}", post.tags.join(", "));
        }
        if let Some(cover) = &post.cover_image {
            println!("Cover: {}", cover);
        }
        println!("--------------------------------");
        println!("{}", post.content);
    }
}

pub(super) fn print_categories(categories: &[Indexed<Category>]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }
    let name_width = categories
        .iter()
        .map(|c| c.record.name.width())
        .max()
        .unwrap_or(0);

    for entry in categories {
        let category = &entry.record;
        let padding = name_width.saturating_sub(category.name.width());
        println!(
            "{:>3}. {}{}  {}  {}",
            entry.index,
            category.name.bold(),
            " ".repeat(padding),
            category.id.dimmed(),
            category.description.as_deref().unwrap_or("")
        );
    }
}

pub(super) fn print_themes(themes: &[Indexed<Theme>], active: Option<&Theme>) {
    if themes.is_empty() {
        println!("No themes found.");
        return;
    }
    let name_width = themes
        .iter()
        .map(|t| t.record.name.width())
        .max()
        .unwrap_or(0);

    for entry in themes {
        let theme = &entry.record;
        let is_active = active.is_some_and(|a| a.id == theme.id);
        let marker = if is_active { ACTIVE_MARKER } else { " " };
        let padding = name_width.saturating_sub(theme.name.width());
        let name = if is_active {
            theme.name.green().bold()
        } else {
            theme.name.normal()
        };
        println!(
            "{} {:>2}. {}{}  {} {} {} {}  {}",
            marker.green(),
            entry.index,
            name,
            " ".repeat(padding),
            theme.primary_color,
            theme.secondary_color,
            theme.text_color,
            theme.background_color,
            theme.font_family.dimmed()
        );
    }
}

pub(super) fn print_theme_detail(theme: &Theme, active: bool) {
    let title = if active {
        format!("{} (active)", theme.name)
    } else {
        theme.name.clone()
    };
    println!("{}", title.bold());
    println!("  id:         {}", theme.id);
    println!("  primary:    {}", theme.primary_color);
    println!("  secondary:  {}", theme.secondary_color);
    println!("  text:       {}", theme.text_color);
    println!("  background: {}", theme.background_color);
    println!("  font:       {}", theme.font_family);
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_wide_text_by_display_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        // Each CJK char is two columns wide.
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本語…");
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let s = format_time_ago(Utc::now() - chrono::Duration::hours(2));
        assert_eq!(s.width(), TIME_WIDTH);
        assert!(s.trim_start().starts_with("2 hours"));
    }
}

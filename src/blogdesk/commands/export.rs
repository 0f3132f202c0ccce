use crate::commands::{CmdMessage, CmdResult};
use crate::config::format_date;
use crate::error::{BlogError, Result};
use crate::index::{Indexed, Selector};
use crate::model::{Category, Post};
use crate::preview::category_names;
use crate::store::backend::StorageBackend;
use crate::store::BlogStore;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::helpers::{indexed_posts, resolve_post};

/// Exports posts as markdown files in a `.tar.gz`. With no selectors every
/// post is exported. Without `output` the archive is created in `dir`.
pub fn run<B: StorageBackend>(
    store: &BlogStore<B>,
    selectors: &[Selector],
    dir: &Path,
    output: Option<&Path>,
    date_format: &str,
) -> Result<CmdResult> {
    let posts = resolve_posts(store, selectors)?;

    if posts.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No blog posts to export."));
        return Ok(res);
    }

    let path: PathBuf = match output {
        Some(path) => path.to_path_buf(),
        None => dir.join(format!(
            "blogdesk-{}.tar.gz",
            Utc::now().format("%Y-%m-%d_%H-%M-%S")
        )),
    };
    let file = File::create(&path).map_err(BlogError::Io)?;
    write_archive(file, &posts, &store.all_categories(), date_format)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} blog post(s) to {}",
        posts.len(),
        path.display()
    )));
    Ok(result.with_paths(vec![path]))
}

fn resolve_posts<B: StorageBackend>(
    store: &BlogStore<B>,
    selectors: &[Selector],
) -> Result<Vec<Indexed<Post>>> {
    if selectors.is_empty() {
        Ok(indexed_posts(store))
    } else {
        selectors.iter().map(|s| resolve_post(store, s)).collect()
    }
}

fn write_archive<W: Write>(
    writer: W,
    posts: &[Indexed<Post>],
    categories: &[Category],
    date_format: &str,
) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for entry in posts {
        let post = &entry.record;
        let entry_name = format!(
            "blogdesk/{}-{}.md",
            sanitize_filename(&post.title),
            short_id(&post.id)
        );
        let content = to_markdown(post, categories, date_format);

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(post.updated_at.timestamp().max(0) as u64);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, content.as_bytes())
            .map_err(BlogError::Io)?;
    }

    let enc = tar.into_inner().map_err(BlogError::Io)?;
    enc.finish().map_err(BlogError::Io)?;
    Ok(())
}

/// A post as a markdown document with a small metadata block.
fn to_markdown(post: &Post, categories: &[Category], date_format: &str) -> String {
    let mut out = format!("# {}\n\n", post.title);
    out.push_str(&format!(
        "- Status: {}\n",
        if post.published { "published" } else { "draft" }
    ));
    out.push_str(&format!(
        "- Published: {}\n",
        format_date(post.publish_date(), date_format)
    ));
    let names = category_names(post, categories);
    if !names.is_empty() {
        out.push_str(&format!("- Categories: {}\n", names.join(", ")));
    }
    if !post.tags.is_empty() {
        out.push_str(&format!("- Tags: {}\n", post.tags.join(", ")));
    }
    if let Some(cover) = &post.cover_image {
        out.push_str(&format!("\n![{}]({})\n", post.title, cover));
    }
    out.push('\n');
    out.push_str(&post.content);
    out.push('\n');
    out
}

fn short_id(id: &str) -> &str {
    let tail = id.split_once('-').map(|(_, rest)| rest).unwrap_or(id);
    tail.char_indices().nth(8).map(|(i, _)| &tail[..i]).unwrap_or(tail)
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

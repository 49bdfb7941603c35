//! Gallery document generation.
//!
//! Scans the wallpaper directory (non-recursive) and renders the full gallery
//! page in one pass. There is no incremental state: every regeneration lists
//! the directory fresh and rebuilds the whole document, so the artifact is
//! always a pure function of current directory contents.
//!
//! ## Document shape
//!
//! ```text
//! <head>   title, description, OpenGraph + Twitter cards, Bootstrap CSS
//! <header> site title and lead line
//! <main>   one tile per image: full-size link wrapping an inline preview,
//!          captioned with its 1-based position
//! <script> Bootstrap bundle
//! ```
//!
//! HTML comes from [maud](https://maud.lambda.xyz/): compile-time checked,
//! auto-escaped, no template files to ship.

use crate::classify;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One gallery entry. Nothing but the filename — display order and caption
/// come from its position in the scanned list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
}

impl ImageFile {
    /// Filename without its extension, used as alt text.
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }
}

const SITE_TITLE: &str = "Wallpaper Gallery";
const SITE_LEAD: &str = "Click Image to View Full Size or Download";
const SITE_DESCRIPTION: &str =
    "Desktop wallpaper gallery. Click on any photo to view it full screen and download. \
     New photos and artwork added regularly.";

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css";
const BOOTSTRAP_CSS_SRI: &str =
    "sha384-T3c6CoIi6uLrA9TneNEoa7RxnatzjcDSCmG1MXxSR1GAsXEV/Dwwykc2MPK8M2HN";
const BOOTSTRAP_JS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/js/bootstrap.bundle.min.js";
const BOOTSTRAP_JS_SRI: &str =
    "sha384-C6RzsynM9kWDrMNeT87bh95OGNyZPhcTNXj1NW7RuBCsyN/o0jlpcV8Qyq46cDfL";

/// List the images directly inside `dir`, in sorted (deterministic) order.
///
/// Skips dotfiles, subdirectories, and the output artifact itself — the
/// gallery must never list its own page, whatever name it was given.
pub fn scan(dir: &Path, output_name: &str) -> Result<Vec<ImageFile>, GalleryError> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| {
            !name.starts_with('.') && name != output_name && classify::is_image(Path::new(name))
        })
        .collect();

    names.sort();

    Ok(names.into_iter().map(|name| ImageFile { name }).collect())
}

/// Render the complete gallery document for an ordered set of images.
pub fn render(images: &[ImageFile]) -> Markup {
    html! {
        (DOCTYPE)
        html.w-auto lang="en" {
            head {
                meta charset="utf-8";
                meta http-equiv="X-UA-Compatible" content="IE=edge";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="description" content=(SITE_DESCRIPTION);
                title { (SITE_TITLE) }

                // Social cards
                meta property="og:type" content="website";
                meta property="og:title" content=(SITE_TITLE);
                meta property="og:description" content=(SITE_DESCRIPTION);
                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:title" content=(SITE_TITLE);
                meta name="twitter:description" content=(SITE_DESCRIPTION);

                link href=(BOOTSTRAP_CSS) rel="stylesheet"
                    integrity=(BOOTSTRAP_CSS_SRI) crossorigin="anonymous";
            }
            body.d-flex.flex-column.align-items-start {
                header.container.my-5.border-bottom {
                    h1.display-1 { (SITE_TITLE) }
                    p.lead.text-center { (SITE_LEAD) }
                }
                main.row.text-center {
                    @for (index, image) in images.iter().enumerate() {
                        (tile(image, index + 1))
                    }
                }
                script src=(BOOTSTRAP_JS) integrity=(BOOTSTRAP_JS_SRI)
                    crossorigin="anonymous" {}
            }
        }
    }
}

/// A single gallery tile: clickable full-size link around an inline preview,
/// captioned with its 1-based position.
fn tile(image: &ImageFile, caption: usize) -> Markup {
    html! {
        div.col-lg-3 {
            a href=(image.name) target="_blank" {
                img.img-fluid.m-5.shadow-lg.border.rounded
                    src=(image.name) alt=(image.stem());
            }
            p { (caption) }
        }
    }
}

use anyhow::{Context, Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::reporting::ItemContext;

// @module: Item file discovery and fragment extraction

/// Regex for CDATA sections holding embedded markup
static CDATA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("Invalid CDATA regex")
});

/// Regex for the identifier of an item element
static ITEM_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<item\b[^>]*?\s(?:id|identifier)\s*=\s*"([^"]+)""#).expect("Invalid item id regex")
});

/// One markup payload ready for validation
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFragment {
    pub context: ItemContext,
    pub markup: String,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Find files with one of the given extensions below `root`.
    ///
    /// A file path is returned as-is when its extension matches.
    pub fn find_files<P: AsRef<Path>>(
        root: P,
        extensions: &[String],
        follow_links: bool,
    ) -> Result<Vec<PathBuf>> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(anyhow!("Input path does not exist: {:?}", root));
        }

        let mut result = Vec::new();
        for entry in WalkDir::new(root).follow_links(follow_links) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::has_extension(path, extensions) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    // @checks: Extension match ignoring case and leading dots
    pub fn has_extension<P: AsRef<Path>>(path: P, extensions: &[String]) -> bool {
        let Some(ext) = path.as_ref().extension() else {
            return false;
        };
        let ext = ext.to_string_lossy();
        extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(&ext))
    }

    /// Read a file and split it into fragments.
    ///
    /// XML item files yield one fragment per CDATA section; any other file is
    /// a single fragment.
    pub fn load_fragments<P: AsRef<Path>>(path: P) -> Result<Vec<LoadedFragment>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;

        let is_xml = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("xml"));

        let stem = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        if !is_xml {
            return Ok(vec![LoadedFragment {
                context: ItemContext::new(&stem).with_source(path),
                markup: content,
            }]);
        }

        let item_id = extract_item_id(&content).unwrap_or(stem.as_str()).to_string();
        Ok(extract_cdata_sections(&content)
            .into_iter()
            .enumerate()
            .map(|(index, markup)| LoadedFragment {
                context: ItemContext::new(&item_id)
                    .with_source(path)
                    .with_fragment(index),
                markup: markup.to_string(),
            })
            .collect())
    }
}

/// Contents of every CDATA section, in document order
pub fn extract_cdata_sections(xml: &str) -> Vec<&str> {
    CDATA_REGEX
        .captures_iter(xml)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect()
}

/// Identifier of the first `item` element, if it declares one
pub fn extract_item_id(xml: &str) -> Option<&str> {
    ITEM_ID_REGEX
        .captures(xml)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

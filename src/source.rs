//! Source discovery - turns annotated Rust sources into route records.
//!
//! Walks a directory tree for `.rs` files, parses each one with `syn` and
//! collects the doc-comment group attached to every function and method. Groups
//! that declare a `@router` directive become [`Route`] records; a malformed
//! annotation aborts the whole file and is reported with its path.

use crate::annotation::Route;
use crate::error::{Error, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collects routes from every annotated function under one or more
/// directories, in traversal order.
///
/// # Errors
///
/// Fails on the first file that cannot be read, parsed, or whose annotations
/// are malformed. Nothing is emitted for a failed batch.
pub fn routes_from_directories(directories: &[PathBuf]) -> Result<Vec<Route>> {
    let mut routes = Vec::new();
    for directory in directories {
        routes.extend(routes_from_directory(directory)?);
    }
    Ok(routes)
}

/// Collects routes from every annotated function under one directory.
///
/// The `target` directory and hidden directories are skipped, as are files
/// without the `.rs` extension.
pub fn routes_from_directory(directory: &Path) -> Result<Vec<Route>> {
    let mut routes = Vec::new();

    for entry in WalkDir::new(directory).into_iter().filter_entry(|entry| {
        if entry.path() == directory {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        !name.starts_with('.') && name != "target"
    }) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("failed to access path: {}", err);
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
            routes.extend(routes_from_file(path)?);
        }
    }

    Ok(routes)
}

/// Collects routes from the annotated functions of one file
pub fn routes_from_file(path: &Path) -> Result<Vec<Route>> {
    debug!("parsing source file {}", path.display());

    let content = fs::read_to_string(path).map_err(|err| Error::SourceRead {
        file: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let syntax_tree = syn::parse_file(&content).map_err(|err| Error::SourceRead {
        file: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut routes = Vec::new();
    collect_items(&syntax_tree.items, path, &mut routes)?;

    debug!("found {} routes in {}", routes.len(), path.display());
    Ok(routes)
}

fn collect_items(items: &[syn::Item], file: &Path, routes: &mut Vec<Route>) -> Result<()> {
    for item in items {
        match item {
            syn::Item::Fn(function) => {
                collect_comment_group(&function.attrs, file, routes)?;
            }
            syn::Item::Impl(imp) => {
                for member in &imp.items {
                    if let syn::ImplItem::Fn(method) = member {
                        collect_comment_group(&method.attrs, file, routes)?;
                    }
                }
            }
            syn::Item::Mod(module) => {
                if let Some((_, items)) = &module.content {
                    collect_items(items, file, routes)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn collect_comment_group(
    attrs: &[syn::Attribute],
    file: &Path,
    routes: &mut Vec<Route>,
) -> Result<()> {
    let lines = doc_lines(attrs);
    if lines.is_empty() {
        return Ok(());
    }
    let route = Route::from_comment_group(&lines).map_err(|err| Error::SourceFile {
        file: file.to_path_buf(),
        source: Box::new(err),
    })?;
    // Groups without a @router directive are documentation, not route
    // declarations.
    if !route.path.is_empty() {
        routes.push(route);
    }
    Ok(())
}

/// Extracts the doc-comment lines of an item, in source order
fn doc_lines(attrs: &[syn::Attribute]) -> Vec<String> {
    let mut lines = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let syn::Meta::NameValue(name_value) = &attr.meta {
            if let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(value),
                ..
            }) = &name_value.value
            {
                lines.push(value.value());
            }
        }
    }
    lines
}

use std::{
    fs::Metadata,
    path::{Path, PathBuf},
};

use junkyard_inventory::size::format_size;
use tokio::{
    fs,
    io::{AsyncBufReadExt, BufReader},
};

pub const MAX_PREVIEW_LINES: usize = 1000;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Preview {
    Content(PathBuf, Vec<String>),
    Directory(PathBuf, Vec<String>),
    None(PathBuf, String),
}

impl Preview {
    pub fn path(&self) -> &Path {
        match self {
            Preview::Content(path, _) | Preview::Directory(path, _) | Preview::None(path, _) => {
                path
            }
        }
    }

    pub fn lines(&self) -> &[String] {
        match self {
            Preview::Content(_, lines) | Preview::Directory(_, lines) => lines,
            Preview::None(_, _) => &[],
        }
    }
}

/// Never fails. Anything that cannot be shown ends up as [`Preview::None`]
/// carrying the best known media type.
pub async fn load(path: &Path) -> Preview {
    let metadata = match fs::symlink_metadata(path).await {
        Ok(it) => it,
        Err(error) => {
            tracing::debug!("preview of {:?} not possible: {:?}", path, error);
            return cannot_preview(path, FALLBACK_MEDIA_TYPE);
        }
    };

    if metadata.is_dir() {
        return match load_directory(path).await {
            Ok(lines) => Preview::Directory(path.to_path_buf(), lines),
            Err(error) => {
                tracing::debug!("listing {:?} failed: {:?}", path, error);
                cannot_preview(path, "inode/directory")
            }
        };
    }

    match infer::get_from_path(path) {
        Ok(Some(kind)) if !kind.mime_type().starts_with("text") => {
            return cannot_preview(path, kind.mime_type());
        }
        Ok(_) => {}
        Err(error) => {
            tracing::debug!("media type of {:?} unresolvable: {:?}", path, error);
            return cannot_preview(path, FALLBACK_MEDIA_TYPE);
        }
    }

    match load_text(path).await {
        Ok(Some(lines)) => Preview::Content(path.to_path_buf(), lines),
        Ok(None) => cannot_preview(path, FALLBACK_MEDIA_TYPE),
        Err(error) => {
            tracing::debug!("reading {:?} failed: {:?}", path, error);
            cannot_preview(path, FALLBACK_MEDIA_TYPE)
        }
    }
}

fn cannot_preview(path: &Path, media_type: &str) -> Preview {
    Preview::None(path.to_path_buf(), media_type.to_string())
}

async fn load_text(path: &Path) -> std::io::Result<Option<Vec<String>>> {
    let file = fs::File::open(path).await?;
    let mut reader = BufReader::new(file).lines();

    let mut lines = Vec::new();
    while lines.len() < MAX_PREVIEW_LINES {
        let line = match reader.next_line().await {
            Ok(Some(it)) => it,
            Ok(None) => break,
            Err(error) if error.kind() == std::io::ErrorKind::InvalidData => return Ok(None),
            Err(error) => return Err(error),
        };

        if line.contains('\0') {
            return Ok(None);
        }

        lines.push(line.replace('\t', "    "));
    }

    Ok(Some(lines))
}

async fn load_directory(path: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(path).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let metadata = entry.metadata().await?;
        let mut name = entry.file_name().to_string_lossy().to_string();
        if metadata.is_dir() {
            name.push('/');
        }

        entries.push((name, metadata));
    }

    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    Ok(entries
        .into_iter()
        .map(|(name, metadata)| {
            format!(
                "{} {:>7}  {}",
                mode_string(&metadata),
                format_size(metadata.len()),
                name
            )
        })
        .collect())
}

#[cfg(unix)]
fn mode_string(metadata: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let file_type = metadata.file_type();
    let kind = if file_type.is_dir() {
        'd'
    } else if file_type.is_symlink() {
        'L'
    } else {
        '-'
    };

    let mode = metadata.permissions().mode();
    let mut result = String::from(kind);
    for (bit, c) in [
        (0o400, 'r'),
        (0o200, 'w'),
        (0o100, 'x'),
        (0o040, 'r'),
        (0o020, 'w'),
        (0o010, 'x'),
        (0o004, 'r'),
        (0o002, 'w'),
        (0o001, 'x'),
    ] {
        result.push(if mode & bit != 0 { c } else { '-' });
    }

    result
}

#[cfg(not(unix))]
fn mode_string(metadata: &Metadata) -> String {
    let kind = if metadata.is_dir() { 'd' } else { '-' };
    if metadata.permissions().readonly() {
        format!("{}r--r--r--", kind)
    } else {
        format!("{}rw-rw-rw-", kind)
    }
}

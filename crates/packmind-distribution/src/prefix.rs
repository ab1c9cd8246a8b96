//! Maps renderer output paths into a target's sub-directory.

use packmind_types::{DeleteItem, FileModification, FileUpdates, Target};

/// Prefix a repository-root-relative path with the target's directory.
///
/// The root target is the identity. For any other target the leading slash
/// is dropped and a trailing slash guaranteed, so `/src/` and `/src` both
/// map `AGENTS.md` to `src/AGENTS.md`.
pub fn target_prefixed_path(base_path: &str, target: &Target) -> String {
    if target.path == "/" {
        return base_path.to_string();
    }
    let mut prefix = target.path.trim_start_matches('/').to_string();
    if !prefix.ends_with('/') {
        prefix.push('/');
    }
    format!("{prefix}{base_path}")
}

/// Apply the target prefix to every path in a file-update set.
pub fn prefix_file_updates(updates: FileUpdates, target: &Target) -> FileUpdates {
    FileUpdates {
        create_or_update: updates
            .create_or_update
            .into_iter()
            .map(|file| FileModification {
                path: target_prefixed_path(&file.path, target),
                content: file.content,
            })
            .collect(),
        delete: updates
            .delete
            .into_iter()
            .map(|item| DeleteItem {
                path: target_prefixed_path(&item.path, target),
                kind: item.kind,
            })
            .collect(),
    }
}

use crate::app::error::FileNameError;
use std::path::{Component, Path, PathBuf};

/// Cleans `name` lexically and, when it starts with `~`, replaces the first
/// component with the matching home directory.
///
/// A lone `~` is the home directory of the user running the code; `~name` is
/// the home directory of the named user.
pub fn fix_file_name(name: &Path) -> Result<PathBuf, FileNameError> {
    let cleaned = clean_path(name);

    let mut components = cleaned.components();
    let first = match components.next() {
        Some(Component::Normal(first)) => first.to_string_lossy(),
        _ => return Ok(cleaned),
    };
    if !first.starts_with('~') {
        return Ok(cleaned);
    }

    let mut fixed = expand_tilde(&first)?;
    fixed.push(components.as_path());
    Ok(clean_path(&fixed))
}

/// Turns `~` or `~name` into a home directory.
///
/// `~name` is looked up in `/etc/passwd` only, so users known solely
/// through NSS sources such as LDAP are reported as unknown.
pub fn expand_tilde(tilde: &str) -> Result<PathBuf, FileNameError> {
    match tilde.strip_prefix('~') {
        Some("") => dirs::home_dir().ok_or(FileNameError::NoHomeDir),
        Some(user) => lookup_home(user),
        None => Ok(PathBuf::from(tilde)),
    }
}

#[cfg(unix)]
fn lookup_home(user: &str) -> Result<PathBuf, FileNameError> {
    let passwd = std::fs::read_to_string("/etc/passwd").map_err(FileNameError::Passwd)?;
    home_from_passwd(&passwd, user).ok_or_else(|| FileNameError::UnknownUser(user.to_string()))
}

#[cfg(not(unix))]
fn lookup_home(user: &str) -> Result<PathBuf, FileNameError> {
    Err(FileNameError::UnknownUser(user.to_string()))
}

// name:passwd:uid:gid:gecos:home:shell
#[cfg_attr(not(unix), allow(dead_code))]
fn home_from_passwd(passwd: &str, user: &str) -> Option<PathBuf> {
    passwd
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(|l| l.split(':').collect::<Vec<_>>())
        .find(|fields| fields.len() >= 6 && fields[0] == user)
        .map(|fields| PathBuf::from(fields[5]))
}

/// Lexically simplifies a path: drops `.` components and folds `name/..`
/// pairs. `..` directly under the root is dropped; leading `..` on a
/// relative path is kept. An empty result becomes `.`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Resolves an include target against the directory of the including file.
/// Absolute targets are only cleaned. A leading `~` is an ordinary file
/// name character here, not a home directory.
pub fn fix_include_file_name(target: &str, current: &Path) -> PathBuf {
    let target_path = Path::new(target);
    if target_path.is_absolute() {
        return clean_path(target_path);
    }
    let dir = current.parent().unwrap_or_else(|| Path::new(""));
    clean_path(&dir.join(target_path))
}

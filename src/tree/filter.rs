//! Inclusion/exclusion decisions for inspected entries.

use super::{PathDescriptor, TreeConfig};

/// Decide whether an entry is suppressed from output.
///
/// Rules are evaluated in a fixed precedence order, first match wins:
/// hide-symlinks, then the type-specific exclude override, the general
/// exclude, the type-specific include override, and finally the general
/// include. Exclude therefore always wins over include, and an override is
/// consulted before its general fallback.
pub(super) fn is_filtered_out(details: &PathDescriptor, config: &TreeConfig) -> bool {
    if config.hide_symlinks && details.is_symlink {
        return true;
    }

    let name = details.name.as_str();
    let (specific_include, specific_exclude) = if details.is_dir {
        (&config.include_folders, &config.exclude_folders)
    } else {
        (&config.include_files, &config.exclude_files)
    };

    if let Some(matcher) = specific_exclude {
        if matcher.is_match(name) {
            return true;
        }
    }
    if config.exclude_all.is_match(name) {
        return true;
    }
    if let Some(matcher) = specific_include {
        if !matcher.is_match(name) {
            return true;
        }
    }
    if !config.include_all.is_match(name) {
        return true;
    }

    false
}

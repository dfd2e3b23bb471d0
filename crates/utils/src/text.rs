/// Derive a URL slug from a title: lowercased, with runs of
/// non-alphanumeric characters collapsed to single hyphens and no
/// leading or trailing hyphen.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Extension of an uploaded file name, without the dot.
pub fn file_extension(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation_runs() {
        assert_eq!(
            slugify("Tree Restoration & Refurbishment!"),
            "tree-restoration-refurbishment"
        );
    }

    #[test]
    fn slugify_trims_edges() {
        assert_eq!(slugify("  Villa Garden  "), "villa-garden");
        assert_eq!(slugify("---Green Walls---"), "green-walls");
    }

    #[test]
    fn slugify_passes_through_simple_titles() {
        assert_eq!(slugify("Planters"), "planters");
        assert_eq!(slugify("F&B 2024"), "f-b-2024");
    }

    #[test]
    fn slugify_empty_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn file_extension_basic() {
        assert_eq!(file_extension("hero.png"), Some("png"));
        assert_eq!(file_extension("clip.final.mp4"), Some("mp4"));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension(".hidden"), None);
    }
}

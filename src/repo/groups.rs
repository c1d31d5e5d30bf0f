/// Returns the parent group paths of a project, nearest group first.
///
/// `"org/team/project"` yields `["org/team", "org"]`. A path without a parent
/// segment (including the empty string) yields no groups. Empty segments from
/// doubled or leading slashes are ignored.
pub fn extract_groups(project_path: &str) -> Vec<String> {
    let segments: Vec<&str> = project_path.split('/').filter(|s| !s.is_empty()).collect();

    let Some((_, parents)) = segments.split_last() else {
        return Vec::new();
    };

    (1..=parents.len())
        .rev()
        .map(|depth| parents[..depth].join("/"))
        .collect()
}

use crate::declarations::ConfigFlags;

/// Resolve one boolean config field in place and return the result.
///
/// An explicit boolean already on the field is kept; otherwise a boolean
/// flag named `flag_name` is used; otherwise `default_value`.
pub fn set_boolean_config(
    field: &mut Option<bool>,
    flag_name: Option<&str>,
    flags: &ConfigFlags,
    default_value: bool,
) -> bool {
    let resolved = field
        .or_else(|| flag_name.and_then(|name| flags.boolean(name)))
        .unwrap_or(default_value);
    *field = Some(resolved);
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags_with_watch(watch: Option<bool>) -> ConfigFlags {
        ConfigFlags {
            watch,
            ..Default::default()
        }
    }

    #[test]
    fn should_keep_explicit_value() {
        let mut field = Some(false);
        let resolved = set_boolean_config(&mut field, Some("watch"), &flags_with_watch(Some(true)), true);
        assert!(!resolved);
        assert_eq!(field, Some(false));
    }

    #[test]
    fn should_fall_back_to_flag() {
        let mut field = None;
        let resolved = set_boolean_config(&mut field, Some("watch"), &flags_with_watch(Some(true)), false);
        assert!(resolved);
        assert_eq!(field, Some(true));
    }

    #[test]
    fn should_ignore_flag_without_name() {
        let mut field = None;
        assert!(!set_boolean_config(&mut field, None, &flags_with_watch(Some(true)), false));
    }

    #[test]
    fn should_apply_default_when_flag_absent() {
        let mut field = None;
        assert!(set_boolean_config(&mut field, Some("watch"), &flags_with_watch(None), true));
    }

    #[test]
    fn should_read_unknown_boolean_flags() {
        let mut flags = ConfigFlags::default();
        flags.unknown.insert("fast".to_string(), serde_json::Value::Bool(true));
        flags.unknown.insert("slow".to_string(), serde_json::Value::from("yes"));
        let mut field = None;
        assert!(set_boolean_config(&mut field, Some("fast"), &flags, false));
        let mut field = None;
        assert!(!set_boolean_config(&mut field, Some("slow"), &flags, false));
    }
}

//! Case conversion for registry keys.

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Case policy applied to registry keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCase {
    /// Keys are used as written.
    #[default]
    Preserve,
    /// `my-widget`
    Kebab,
    /// `myWidget`
    Camel,
    /// `MyWidget`
    Pascal,
    /// `my_widget`
    Snake,
}

impl KeyCase {
    /// Rewrites `name` according to this policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use jcod_core::KeyCase;
    ///
    /// assert_eq!(KeyCase::Kebab.apply("MyWidget"), "my-widget");
    /// assert_eq!(KeyCase::Pascal.apply("my-widget"), "MyWidget");
    /// assert_eq!(KeyCase::Preserve.apply("MyWidget"), "MyWidget");
    /// ```
    pub fn apply(self, name: &str) -> Cow<'_, str> {
        match self {
            KeyCase::Preserve => Cow::Borrowed(name),
            KeyCase::Kebab => Cow::Owned(name.to_kebab_case()),
            KeyCase::Snake => Cow::Owned(name.to_snake_case()),
            KeyCase::Camel => Cow::Owned(name.to_lower_camel_case()),
            KeyCase::Pascal => Cow::Owned(name.to_upper_camel_case()),
        }
    }

    /// Returns true unless keys are used as written.
    pub fn is_active(self) -> bool {
        self != KeyCase::Preserve
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case() {
        assert_eq!(KeyCase::Kebab.apply("ReactComponent"), "react-component");
        assert_eq!(KeyCase::Kebab.apply("HTMLElement"), "html-element");
        assert_eq!(KeyCase::Kebab.apply("div"), "div");
        assert_eq!(KeyCase::Kebab.apply("custom-element"), "custom-element");
    }

    #[test]
    fn other_cases() {
        assert_eq!(KeyCase::Snake.apply("LinkCard"), "link_card");
        assert_eq!(KeyCase::Camel.apply("link-card"), "linkCard");
        assert_eq!(KeyCase::Pascal.apply("link_card"), "LinkCard");
        assert_eq!(KeyCase::Pascal.apply("HTMLElement"), "HtmlElement");
    }

    #[test]
    fn preserve_borrows() {
        assert!(matches!(KeyCase::Preserve.apply("Card"), Cow::Borrowed("Card")));
        assert!(!KeyCase::Preserve.is_active());
        assert!(KeyCase::Kebab.is_active());
    }
}

//! Naming helpers shared by the compiler and the emitters.

use std::sync::LazyLock;

use regex::Regex;

/// An uppercase letter preceded by anything that is not an uppercase letter.
static HUMP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^A-Z])([A-Z])").expect("hump pattern is valid"));

/// Splits a camel-case name at its humps and lower-cases the result.
///
/// A separator is inserted before every uppercase letter that follows a
/// non-uppercase character, so acronyms stay together.
///
/// # Examples
///
/// ```
/// use loccat::utils::split_humps;
///
/// assert_eq!(split_humps("helpTitle", '.'), "help.title");
/// assert_eq!(split_humps("HelpCommand", '_'), "help_command");
/// assert_eq!(split_humps("HTTPStatus", '_'), "httpstatus");
/// assert_eq!(split_humps("plain", '.'), "plain");
/// ```
pub fn split_humps(name: &str, separator: char) -> String {
    let replacement = format!("${{1}}{}${{2}}", separator);
    HUMP_REGEX
        .replace_all(name, replacement.as_str())
        .to_lowercase()
}

/// Derives the accessor identifier for a logical key.
///
/// Every character that cannot appear in an identifier becomes `_`, and a
/// leading digit is prefixed with `_`.
///
/// # Examples
///
/// ```
/// use loccat::utils::accessor_ident;
///
/// assert_eq!(accessor_ident("greeting.hello"), "greeting_hello");
/// assert_eq!(accessor_ident("menu.item-1"), "menu_item_1");
/// assert_eq!(accessor_ident("404.title"), "_404_title");
/// ```
pub fn accessor_ident(key: &str) -> String {
    let mut ident: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Replaces the `%locale%` and `%name%` placeholders of a location template.
///
/// The locale is lower-cased with `-` turned into `_`; dots in the logical
/// file name become path separators.
///
/// # Examples
///
/// ```
/// use loccat::utils::expand_location;
///
/// assert_eq!(
///     expand_location("%locale%/%name%.yaml", "en-US", "commands.help_command"),
///     "en_us/commands/help_command.yaml"
/// );
/// ```
pub fn expand_location(format: &str, locale: &str, file_name: &str) -> String {
    format
        .replace("%locale%", &locale.to_lowercase().replace('-', "_"))
        .replace("%name%", &file_name.replace('.', "/"))
}

#[cfg(test)]
mod tests {
    use crate::utils::*;

    #[test]
    fn test_split_humps() {
        assert_eq!(split_humps("greetingHello", '.'), "greeting.hello");
        assert_eq!(split_humps("aBcD", '.'), "a.bc.d");
        assert_eq!(split_humps("userID", '_'), "user_id");
        assert_eq!(split_humps("page2Title", '.'), "page2.title");
        assert_eq!(split_humps("", '.'), "");
        assert_eq!(split_humps("Welcome", '_'), "welcome");
    }

    #[test]
    fn test_accessor_ident() {
        assert_eq!(accessor_ident("farewell"), "farewell");
        assert_eq!(accessor_ident("a.b.c"), "a_b_c");
        assert_eq!(accessor_ident("Menu.Open"), "menu_open");
        assert_eq!(accessor_ident(""), "_");
        assert_eq!(accessor_ident("ü"), "_");
    }

    #[test]
    fn test_expand_location() {
        assert_eq!(
            expand_location("lang/%locale%/%name%.json", "de-DE", "greetings"),
            "lang/de_de/greetings.json"
        );
        assert_eq!(
            expand_location("%name%.%locale%.yml", "fr", "a.b"),
            "a/b.fr.yml"
        );
    }
}

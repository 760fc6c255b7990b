//! Generated type and field names

/// Splits a string into words.
///
/// Boundaries are non-alphanumeric characters, lower-to-upper case changes,
/// the last capital of an acronym followed by a lowercase letter
/// (`XMLHttp` -> `XML`, `Http`), and letter/digit changes.
fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.map_or(false, char::is_lowercase))
                || (prev.is_alphabetic() && c.is_numeric())
                || (prev.is_numeric() && c.is_alphabetic());
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Converts a phrase to camelCase (`"all MarkdownRemark"` -> `allMarkdownRemark`)
pub fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, word) in words(input).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Root query field of a type's connection
pub fn connection_field_name(type_name: &str) -> String {
    camel_case(&format!("all {}", type_name))
}

/// Name of a type's filter input
pub fn filter_input_name(type_name: &str) -> String {
    camel_case(&format!("filter {}", type_name))
}

/// Name of a type's connection type
pub fn connection_type_name(type_name: &str) -> String {
    format!("{}Connection", type_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("all MarkdownRemark"), "allMarkdownRemark");
        assert_eq!(camel_case("filter SitePage"), "filterSitePage");
        assert_eq!(camel_case("all JSON Data"), "allJsonData");
        assert_eq!(camel_case("all XMLHttpRequest"), "allXmlHttpRequest");
        assert_eq!(camel_case("all posts_yaml"), "allPostsYaml");
        assert_eq!(camel_case("all Type2Thing"), "allType2Thing");
        assert_eq!(camel_case("  --  "), "");
    }

    #[test]
    fn test_generated_names() {
        assert_eq!(connection_field_name("ImageSharp"), "allImageSharp");
        assert_eq!(filter_input_name("ImageSharp"), "filterImageSharp");
        assert_eq!(connection_type_name("ImageSharp"), "ImageSharpConnection");
    }

    #[test]
    fn test_distinct_types_can_collide() {
        assert_eq!(
            connection_field_name("posts_yaml"),
            connection_field_name("PostsYaml")
        );
    }
}

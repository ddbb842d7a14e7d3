use crate::models::{ExplainRequest, GenerateRequest, Locale, NameLength, NamingTask};

pub const GENERATE_SYSTEM: &str = include_str!("../data/prompts/generate_system.txt");
pub const GENERATE_LOCALE_EN: &str = include_str!("../data/prompts/generate_locale_en.txt");
pub const GENERATE_LOCALE_ZH: &str = include_str!("../data/prompts/generate_locale_zh.txt");
pub const EXPLAIN_SYSTEM: &str = include_str!("../data/prompts/explain_system.txt");
pub const EXPLAIN_LOCALE_EN: &str = include_str!("../data/prompts/explain_locale_en.txt");
pub const EXPLAIN_LOCALE_ZH: &str = include_str!("../data/prompts/explain_locale_zh.txt");

/// Stop sequences that cut off chain-of-thought blocks.
pub const STOP_SEQUENCES: [&str; 2] = ["<think>", "</think>"];

/// A fully built prompt plus the sampling settings for its task.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub task: NamingTask,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

fn output_language(locale: Locale) -> &'static str {
    match locale {
        Locale::Zh => "中文",
        Locale::En => "English",
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

pub fn generate_prompt(request: &GenerateRequest) -> ChatPrompt {
    let locale = request.locale();
    let locale_instruction = match locale {
        Locale::Zh => GENERATE_LOCALE_ZH,
        Locale::En => GENERATE_LOCALE_EN,
    };

    let mut lines = vec![
        format!("姓氏: {}", request.surname.as_deref().unwrap_or_default()),
        format!("性别: {}", request.gender.as_deref().unwrap_or_default()),
    ];
    if let Some(birth) = present(&request.birth_date_time) {
        lines.push(format!("出生日期时辰: {}", birth));
    }
    if let Some(expectations) = request.expectations.as_ref().filter(|e| !e.is_empty()) {
        lines.push(format!("父母期望: {}", expectations.join("、")));
    }
    if let Some(avoid) = present(&request.avoid_chars) {
        lines.push(format!("避讳字: {}", avoid));
    }
    if let Some(length) = request.name_length_preference {
        let label = match length {
            NameLength::Single => "单字",
            NameLength::Double => "双字",
        };
        lines.push(format!("字数偏好: {}", label));
    }
    lines.push(format!("输出语言: {}", output_language(locale)));

    ChatPrompt {
        task: NamingTask::Generate,
        system: render(
            GENERATE_SYSTEM.trim_end(),
            &[("locale_instruction", locale_instruction.trim())],
        ),
        user: lines.join("\n"),
        temperature: 0.6,
        max_tokens: 1500,
    }
}

pub fn explain_prompt(request: &ExplainRequest) -> ChatPrompt {
    let locale = request.locale();
    let locale_instruction = match locale {
        Locale::Zh => EXPLAIN_LOCALE_ZH,
        Locale::En => EXPLAIN_LOCALE_EN,
    };

    let mut lines = vec![format!("名字: {}", request.name.as_deref().unwrap_or_default())];
    if let Some(context) = present(&request.context) {
        lines.push(format!("补充说明: {}", context));
    }
    lines.push(format!("输出语言: {}", output_language(locale)));

    ChatPrompt {
        task: NamingTask::Explain,
        system: render(
            EXPLAIN_SYSTEM.trim_end(),
            &[("locale_instruction", locale_instruction.trim())],
        ),
        user: lines.join("\n"),
        temperature: 0.4,
        max_tokens: 900,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_prompts_are_non_empty() {
        assert!(GENERATE_SYSTEM.contains("{{locale_instruction}}"));
        assert!(EXPLAIN_SYSTEM.contains("{{locale_instruction}}"));
        assert!(!GENERATE_LOCALE_EN.is_empty());
        assert!(!GENERATE_LOCALE_ZH.is_empty());
        assert!(!EXPLAIN_LOCALE_EN.is_empty());
        assert!(!EXPLAIN_LOCALE_ZH.is_empty());
    }

    #[test]
    fn test_generate_prompt_minimal_fields() {
        let prompt = generate_prompt(&GenerateRequest {
            surname: Some("李".to_string()),
            gender: Some("female".to_string()),
            ..Default::default()
        });

        assert_eq!(prompt.user, "姓氏: 李\n性别: female\n输出语言: English");
        assert!(prompt.system.ends_with(GENERATE_LOCALE_EN.trim()));
        assert!(!prompt.system.contains("{{"));
        assert_eq!(prompt.max_tokens, 1500);
    }

    #[test]
    fn test_generate_prompt_all_fields_in_chinese() {
        let prompt = generate_prompt(&GenerateRequest {
            surname: Some("王".to_string()),
            gender: Some("male".to_string()),
            birth_date_time: Some("2024-02-10 子时".to_string()),
            expectations: Some(vec!["知书达理".to_string(), "平安顺遂".to_string()]),
            avoid_chars: Some("伟".to_string()),
            name_length_preference: Some(NameLength::Double),
            locale: Some("zh".to_string()),
        });

        assert_eq!(
            prompt.user,
            "姓氏: 王\n性别: male\n出生日期时辰: 2024-02-10 子时\n父母期望: 知书达理、平安顺遂\n避讳字: 伟\n字数偏好: 双字\n输出语言: 中文"
        );
        assert!(prompt.system.ends_with(GENERATE_LOCALE_ZH.trim()));
    }

    #[test]
    fn test_generate_prompt_skips_empty_optionals() {
        let prompt = generate_prompt(&GenerateRequest {
            surname: Some("张".to_string()),
            gender: Some("male".to_string()),
            birth_date_time: Some(String::new()),
            expectations: Some(Vec::new()),
            avoid_chars: Some(" ".to_string()),
            ..Default::default()
        });

        assert_eq!(prompt.user, "姓氏: 张\n性别: male\n输出语言: English");
    }

    #[test]
    fn test_explain_prompt_with_context() {
        let prompt = explain_prompt(&ExplainRequest {
            name: Some("李白".to_string()),
            context: Some("唐代诗人".to_string()),
            locale: Some("zh".to_string()),
        });

        assert_eq!(prompt.task, NamingTask::Explain);
        assert_eq!(prompt.user, "名字: 李白\n补充说明: 唐代诗人\n输出语言: 中文");
        assert!(prompt.system.ends_with(EXPLAIN_LOCALE_ZH.trim()));
        assert_eq!(prompt.temperature, 0.4);
    }
}

//! Plain-text rendering of naming results for the terminal.
//!
//! Only fields present on the payload are printed.

use crate::models::{Locale, NameAnalysis, NameExplanation, NameSuggestionSet};
use std::fmt::Write as _;

struct Labels {
    pinyin: &'static str,
    meaning: &'static str,
    rationale: &'static str,
    phonetics: &'static str,
    structure: &'static str,
    culture: &'static str,
    wuxing: &'static str,
    suggestions: &'static str,
    analysis: &'static str,
    empty: &'static str,
}

fn labels(locale: Locale) -> Labels {
    match locale {
        Locale::Zh => Labels {
            pinyin: "拼音",
            meaning: "寓意",
            rationale: "起名理由",
            phonetics: "音韵",
            structure: "字形",
            culture: "文化出处",
            wuxing: "五行",
            suggestions: "名字建议",
            analysis: "整体分析",
            empty: "没有可显示的结果。",
        },
        Locale::En => Labels {
            pinyin: "Pinyin",
            meaning: "Meaning",
            rationale: "Rationale",
            phonetics: "Phonetics",
            structure: "Structure",
            culture: "Culture",
            wuxing: "Wuxing",
            suggestions: "Suggestions",
            analysis: "Analysis",
            empty: "Nothing to show.",
        },
    }
}

fn field(out: &mut String, indent: &str, label: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
        let _ = writeln!(out, "{}{}: {}", indent, label, value);
    }
}

fn analysis(out: &mut String, l: &Labels, analysis: &NameAnalysis, indent: &str) {
    field(out, indent, l.phonetics, &analysis.phonetics);
    field(out, indent, l.structure, &analysis.structure);
    field(out, indent, l.culture, &analysis.culture);
    field(out, indent, l.wuxing, &analysis.wuxing);
}

pub fn render_explanation(explanation: &NameExplanation, locale: Locale) -> String {
    let l = labels(locale);
    let mut out = String::new();

    if let Some(name) = explanation.name.as_deref().filter(|n| !n.is_empty()) {
        let _ = writeln!(out, "{}", name);
    }
    field(&mut out, "", l.pinyin, &explanation.pinyin);
    field(&mut out, "", l.meaning, &explanation.meaning);
    analysis(
        &mut out,
        &l,
        &NameAnalysis {
            phonetics: explanation.phonetics.clone(),
            structure: explanation.structure.clone(),
            culture: explanation.culture.clone(),
            wuxing: explanation.wuxing.clone(),
        },
        "",
    );

    if out.is_empty() {
        out.push_str(l.empty);
        out.push('\n');
    }
    out
}

pub fn render_suggestions(set: &NameSuggestionSet, locale: Locale) -> String {
    let l = labels(locale);
    let mut out = String::new();

    if !set.suggestions.is_empty() {
        let _ = writeln!(out, "{}", l.suggestions);
        for (i, suggestion) in set.suggestions.iter().enumerate() {
            let name = suggestion.name.as_deref().unwrap_or("?");
            let _ = writeln!(out, "{}. {}", i + 1, name);
            field(&mut out, "   ", l.pinyin, &suggestion.pinyin);
            field(&mut out, "   ", l.meaning, &suggestion.meaning);
            field(&mut out, "   ", l.rationale, &suggestion.rationale);
        }
    }

    if let Some(a) = &set.analysis {
        let mut section = String::new();
        analysis(&mut section, &l, a, "   ");
        if !section.is_empty() {
            let _ = writeln!(out, "{}", l.analysis);
            out.push_str(&section);
        }
    }

    if out.is_empty() {
        out.push_str(l.empty);
        out.push('\n');
    }
    out
}

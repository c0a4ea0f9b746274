use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Japanese,
}

static CURRENT_LANGUAGE: OnceLock<RwLock<Language>> = OnceLock::new();

pub const ALL_LANGUAGES: &[Language] = &[Language::English, Language::Japanese];

impl Language {
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Japanese => "Japanese",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(tr(self.label()))
    }
}

fn language_lock() -> &'static RwLock<Language> {
    CURRENT_LANGUAGE.get_or_init(|| RwLock::new(Language::English))
}

pub fn init_language(language: Language) {
    if CURRENT_LANGUAGE.set(RwLock::new(language)).is_err() {
        set_language(language);
    }
}

pub fn set_language(language: Language) {
    let mut guard = language_lock().write().expect("language write lock poisoned");
    *guard = language;
}

fn current_language() -> Language {
    *language_lock().read().expect("language read lock poisoned")
}

fn japanese_map() -> &'static HashMap<&'static str, &'static str> {
    static MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| {
        HashMap::from([
            ("Recipe Book", "レシピブック"),
            ("Search recipes", "レシピ検索"),
            ("Register recipe", "レシピ登録"),
            ("Language", "言語"),
            ("English", "英語"),
            ("Japanese", "日本語"),
            ("Any", "指定なし"),
            ("Recipe name", "レシピ名"),
            ("Recipe name *", "レシピ名 *"),
            ("Part of the recipe name", "レシピ名の一部"),
            ("Cuisine", "料理ジャンル"),
            ("Category", "カテゴリー"),
            ("Occasion", "シーン"),
            ("Search", "検索"),
            ("Searching...", "検索中..."),
            ("Clear filters", "条件をクリア"),
            ("Recipes found", "見つかったレシピ"),
            ("No recipe found. Try other filters.", "レシピが見つかりません。別の条件をお試しください。"),
            ("Show details", "詳細を見る"),
            ("Back to Search", "検索に戻る"),
            ("Loading recipe...", "レシピを読み込み中..."),
            ("Recipe not found. It may have been deleted.", "レシピが見つかりません。削除された可能性があります。"),
            ("Last update", "最終更新"),
            ("Ingredients", "材料"),
            ("Ingredients *", "材料 *"),
            ("One ingredient per line", "1行に1つの材料"),
            ("Steps", "手順"),
            ("Step", "手順"),
            ("Describe this step", "この手順の説明"),
            ("Add step", "手順を追加"),
            ("Delete last step", "最後の手順を削除"),
            ("Copy JSON", "JSONをコピー"),
            ("Delete", "削除"),
            ("Deleting...", "削除中..."),
            ("Delete recipe", "レシピの削除"),
            ("Do you really want to delete", "本当に削除しますか"),
            ("Cancel", "キャンセル"),
            ("Recipe deleted.", "レシピを削除しました。"),
            ("Register", "登録"),
            ("Saving...", "保存中..."),
            ("Recipe registered.", "レシピを登録しました。"),
            ("Recipe name is required!", "レシピ名は必須です!"),
            ("Recipe name must be at most 50 characters.", "レシピ名は50文字以内で入力してください。"),
            ("Ingredients are required!", "材料は必須です!"),
            ("Connecting to the recipe database...", "レシピデータベースに接続中..."),
            ("Could not connect to the recipe database.", "レシピデータベースに接続できませんでした。"),
            ("Database:", "データベース:"),
            ("Retry", "再試行"),
            ("African", "アフリカ料理"),
            ("American", "アメリカ料理"),
            ("Asian", "アジア料理"),
            ("European", "ヨーロッパ料理"),
            ("Indian", "インド料理"),
            ("Middle Eastern", "中東料理"),
            ("Bread", "パン"),
            ("Rice", "ご飯もの"),
            ("Pasta", "パスタ"),
            ("Curry", "カレー"),
            ("Salad", "サラダ"),
            ("Soup", "スープ"),
            ("Meat", "肉料理"),
            ("Fish", "魚料理"),
            ("Dessert", "デザート"),
            ("Others (source etc.)", "その他(ソースなど)"),
            ("Quick & Easy", "時短・簡単"),
            ("Spicy", "辛い"),
            ("Healthy", "ヘルシー"),
            ("Party", "パーティー"),
            ("Vegetarian", "ベジタリアン"),
        ])
    })
}

/// Looks `text` up for `language`; unknown keys pass through unchanged.
pub fn translate(language: Language, text: &'static str) -> &'static str {
    match language {
        Language::English => text,
        Language::Japanese => japanese_map().get(text).copied().unwrap_or(text),
    }
}

pub fn tr(text: &'static str) -> &'static str {
    translate(current_language(), text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{ALL_CATEGORIES, ALL_CUISINES, ALL_OCCASIONS};

    #[test]
    fn english_is_identity() {
        assert_eq!(translate(Language::English, "Back to Search"), "Back to Search");
    }

    #[test]
    fn japanese_translates_known_keys() {
        assert_eq!(translate(Language::Japanese, "Back to Search"), "検索に戻る");
        assert_eq!(translate(Language::Japanese, "Quick & Easy"), "時短・簡単");
    }

    #[test]
    fn unknown_keys_fall_back_to_english() {
        assert_eq!(translate(Language::Japanese, "Not a known key"), "Not a known key");
    }

    #[test]
    fn every_option_label_has_a_japanese_entry() {
        let labels = ALL_CUISINES
            .iter()
            .map(|value| value.label())
            .chain(ALL_CATEGORIES.iter().map(|value| value.label()))
            .chain(ALL_OCCASIONS.iter().map(|value| value.label()));
        for label in labels {
            assert!(japanese_map().contains_key(label), "missing translation for {label:?}");
        }
    }

    #[test]
    fn language_serializes_lowercase() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            language: Language,
        }
        let rendered =
            toml::to_string(&Wrapper { language: Language::Japanese }).expect("serialize");
        assert_eq!(rendered.trim(), "language = \"japanese\"");
    }
}

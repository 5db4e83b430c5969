use crate::domain::model::RoleTaxonomy;
use std::collections::BTreeSet;

/// 將角色同義詞攤平成不重複的關鍵字清單 (排序後輸出，查詢字串才會穩定)
pub fn build_keywords(taxonomy: &RoleTaxonomy) -> Vec<String> {
    let keywords: BTreeSet<String> = taxonomy
        .roles()
        .flat_map(|(_, phrases)| phrases.iter())
        .map(|phrase| phrase.trim())
        .filter(|phrase| !phrase.is_empty())
        .map(str::to_string)
        .collect();

    keywords.into_iter().collect()
}

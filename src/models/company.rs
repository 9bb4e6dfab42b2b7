use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 公司信息 (company_info 表: 第 0 列为键, 第 1 列为值)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyProfile {
    fields: HashMap<String, String>,
}

impl CompanyProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// 后出现的同名键覆盖先前的值
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// 缺失的字段按空串处理
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn company_name(&self) -> &str {
        self.get("company_name")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CompanyProfile {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut profile = Self::new();
        for (k, v) in iter {
            profile.insert(k, v);
        }
        profile
    }
}

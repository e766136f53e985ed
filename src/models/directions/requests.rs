use serde::Deserialize;

// 创建方向请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDirectionRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub manager_ids: Vec<i64>,
}

// 更新方向请求
//
// manager_ids 缺省时不改动负责人，给出（包括空数组）时整体替换
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDirectionRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub manager_ids: Option<Vec<i64>>,
}

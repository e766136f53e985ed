use super::entities::Direction;
use serde::Serialize;

// 方向列表响应
#[derive(Debug, Serialize)]
pub struct DirectionListResponse {
    pub items: Vec<Direction>,
}

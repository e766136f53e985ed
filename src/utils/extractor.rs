//! 路径参数提取器

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::errors::StudioError;

/// 从路径 `{id}` 中解析的正整数 ID，解析失败返回参数错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = StudioError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse_id(req.match_info().get("id")).map(SafeIDI64))
    }
}

fn parse_id(raw: Option<&str>) -> Result<i64, StudioError> {
    let raw = raw.ok_or_else(|| StudioError::invalid_params("Missing id in path"))?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(StudioError::invalid_params(format!("Invalid id: {raw}"))),
    }
}

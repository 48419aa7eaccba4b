//! Data Transfer Objects - 后端 JSON 结构
//!
//! 所有可缺失/可为 null/类型不稳定的字段都在这里解析成确定的类型与默认值，
//! 领域层不再处理 null。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::application::ports::{LoginResponse, ProjectSubmission, RegisteredUser};
use crate::domain::project::{ContentType, Pledge, PledgeId, Project, ProjectId, UserId};

// ============================================================================
// 宽松解析
// ============================================================================

/// 数字或数字字符串 → u64；负数、小数部分、其他类型按规则处理
fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            })
        }
        _ => None,
    }
}

/// 无效值按 0 处理
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_u64(&value)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0))
}

fn lenient_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_u64(&value))
}

/// 只有 JSON true 才是 true
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

/// null → 空串
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// null / 空串 → None
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

fn lenient_content_type<'de, D>(deserializer: D) -> Result<ContentType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(ContentType::from).unwrap_or_default())
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PledgeDto {
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub amount: u32,
    #[serde(default, deserialize_with = "optional_text")]
    pub add_content: Option<String>,
    /// 旧记录的正文字段
    #[serde(default, deserialize_with = "optional_text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub anonymous: bool,
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub supporter: Option<u64>,
    #[serde(default, deserialize_with = "optional_text")]
    pub supporter_username: Option<String>,
}

impl From<PledgeDto> for Pledge {
    fn from(dto: PledgeDto) -> Self {
        Self {
            id: dto.id.map(PledgeId::new),
            amount: dto.amount,
            add_content: dto.add_content.or(dto.content).unwrap_or_default(),
            comment: dto.comment,
            anonymous: dto.anonymous,
            supporter: dto.supporter.map(UserId::new),
            supporter_username: dto.supporter_username,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectDto {
    pub id: u64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "lenient_content_type")]
    pub content_type: ContentType,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub goal: u32,
    #[serde(default, deserialize_with = "nullable_string")]
    pub starting_content: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub current_content: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub owner: Option<u64>,
    #[serde(default, deserialize_with = "optional_text")]
    pub owner_username: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_open: bool,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pledges: Option<Vec<PledgeDto>>,
}

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Self {
            id: ProjectId::new(dto.id),
            title: dto.title,
            description: dto.description,
            genre: dto.genre,
            content_type: dto.content_type,
            goal: dto.goal,
            starting_content: dto.starting_content,
            current_content: dto.current_content,
            image: dto.image,
            owner: UserId::new(dto.owner.unwrap_or_default()),
            owner_username: dto.owner_username,
            is_open: dto.is_open,
            date_created: dto.date_created,
            pledges: dto
                .pledges
                .unwrap_or_default()
                .into_iter()
                .map(Pledge::from)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginResponseDto {
    pub token: String,
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub user_id: Option<u64>,
    #[serde(default, deserialize_with = "optional_text")]
    pub email: Option<String>,
}

impl LoginResponseDto {
    /// 缺少 user_id 的登录响应不可用
    pub fn into_login(self) -> Option<LoginResponse> {
        let user_id = self.user_id?;
        if self.token.is_empty() {
            return None;
        }
        Some(LoginResponse {
            token: self.token,
            user_id: UserId::new(user_id),
            email: self.email,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UserDto {
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub username: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub email: Option<String>,
}

impl From<UserDto> for RegisteredUser {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id.map(UserId::new),
            username: dto.username,
            email: dto.email,
        }
    }
}

// ============================================================================
// Request DTOs
// ============================================================================

/// 不带图片时的项目 JSON 请求体
#[derive(Debug, Serialize)]
pub struct ProjectRequest<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub goal: u32,
    pub genre: &'a str,
    pub content_type: ContentType,
    pub owner: UserId,
    pub is_open: bool,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub starting_content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_content: Option<&'a str>,
}

impl<'a> From<&'a ProjectSubmission> for ProjectRequest<'a> {
    fn from(submission: &'a ProjectSubmission) -> Self {
        Self {
            title: &submission.title,
            description: &submission.description,
            goal: submission.goal,
            genre: &submission.genre,
            content_type: submission.content_type,
            owner: submission.owner,
            is_open: submission.is_open,
            starting_content: &submission.starting_content,
            current_content: submission.current_content.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_defaults_at_boundary() {
        let dto: ProjectDto = serde_json::from_value(json!({
            "id": 7,
            "title": "Untitled",
            "description": null,
            "content_type": "haiku",
            "goal": null,
            "current_content": "",
            "image": null,
            "pledges": null
        }))
        .unwrap();
        let project = Project::from(dto);

        assert_eq!(project.content_type, ContentType::Story);
        assert_eq!(project.goal, 0);
        assert_eq!(project.description, "");
        assert_eq!(project.starting_content, "");
        assert_eq!(project.current_content, None);
        assert_eq!(project.genre, None);
        assert!(!project.is_open);
        assert!(project.pledges.is_empty());
    }

    #[test]
    fn test_padded_content_type_is_story() {
        let dto: ProjectDto =
            serde_json::from_value(json!({ "id": 2, "content_type": " poem " })).unwrap();
        assert_eq!(Project::from(dto).content_type, ContentType::Story);
    }

    #[test]
    fn test_full_project() {
        let dto: ProjectDto = serde_json::from_value(json!({
            "id": 1,
            "title": "Odes",
            "description": "Lines",
            "genre": "Romance",
            "content_type": "poem",
            "goal": 4,
            "starting_content": "Line one\nLine two",
            "image": "/media/odes.jpg",
            "owner": 3,
            "owner_username": "bard",
            "is_open": true,
            "date_created": "2024-05-01T10:00:00Z",
            "pledges": [
                {"id": 9, "amount": 1, "add_content": "Line three", "comment": "hi",
                 "anonymous": false, "supporter": 4, "supporter_username": "muse"}
            ]
        }))
        .unwrap();
        let project = Project::from(dto);

        assert_eq!(project.content_type, ContentType::Poem);
        assert_eq!(project.owner, UserId::new(3));
        assert!(project.date_created.is_some());
        assert_eq!(project.pledges[0].id, Some(PledgeId::new(9)));
        assert_eq!(project.pledges[0].supporter_username.as_deref(), Some("muse"));
        assert_eq!(project.ledger().total_segments(), 3);
    }

    #[test]
    fn test_pledge_amount_coercion() {
        let amounts = [
            (json!(3), 3),
            (json!("4"), 4),
            (json!(" 5 "), 5),
            (json!(2.9), 2),
            (json!("abc"), 0),
            (json!(-2), 0),
            (json!(null), 0),
            (json!(true), 0),
        ];
        for (raw, expected) in amounts {
            let dto: PledgeDto = serde_json::from_value(json!({ "amount": raw })).unwrap();
            assert_eq!(dto.amount, expected, "amount {:?}", raw);
        }

        let missing: PledgeDto = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.amount, 0);
    }

    #[test]
    fn test_pledge_legacy_content_field() {
        let dto: PledgeDto =
            serde_json::from_value(json!({ "amount": 1, "content": "old text" })).unwrap();
        assert_eq!(Pledge::from(dto).add_content, "old text");

        let empty: PledgeDto = serde_json::from_value(json!({ "amount": 1 })).unwrap();
        assert_eq!(Pledge::from(empty).add_content, "");
    }

    #[test]
    fn test_login_requires_user_id() {
        let ok: LoginResponseDto =
            serde_json::from_value(json!({"token": "t", "user_id": 5, "email": "a@b.c"})).unwrap();
        assert_eq!(ok.into_login().unwrap().user_id, UserId::new(5));

        let missing: LoginResponseDto = serde_json::from_value(json!({"token": "t"})).unwrap();
        assert!(missing.into_login().is_none());
    }

    #[test]
    fn test_project_request_skips_empty_fields() {
        let submission = ProjectSubmission {
            title: "T".to_string(),
            description: "D".to_string(),
            goal: 3,
            genre: "Comedy".to_string(),
            content_type: ContentType::Poem,
            owner: UserId::new(2),
            starting_content: String::new(),
            current_content: None,
            is_open: true,
            image: None,
        };
        let body = serde_json::to_value(ProjectRequest::from(&submission)).unwrap();

        assert_eq!(body["content_type"], "poem");
        assert_eq!(body["owner"], 2);
        assert!(body.get("starting_content").is_none());
        assert!(body.get("current_content").is_none());
    }
}

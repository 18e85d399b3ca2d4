use domain::CurrentUser;
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlSessionUser {
    pub user_id: String,
    // 登录接口返回的完整用户 JSON
    pub payload: String,
}

impl TryFrom<SqlSessionUser> for CurrentUser {
    type Error = serde_json::Error;

    fn try_from(sql: SqlSessionUser) -> Result<Self, Self::Error> {
        serde_json::from_str(&sql.payload)
    }
}

/// Database types for the tutoring roster

#[derive(Debug, Clone)]
pub struct DbStudent {
    pub student_id: i64,
    pub user_id: i64,
    pub name: String,
    pub subject: Option<String>,
}

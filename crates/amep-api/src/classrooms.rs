//! Classroom endpoints.

use amep_core::Classroom;

use crate::{ApiClient, error::ApiError, http::check_response};

#[derive(serde::Deserialize)]
struct ClassroomDto {
    id: String,
    name: String,
    #[serde(default)]
    student_count: Option<u32>,
    #[serde(default)]
    students: Option<Vec<serde_json::Value>>,
}

impl ClassroomDto {
    fn into_classroom(self) -> Classroom {
        // Some deployments inline the roster instead of a count.
        let student_count = self.student_count.unwrap_or_else(|| {
            self.students
                .as_ref()
                .map_or(0, |s| u32::try_from(s.len()).unwrap_or(u32::MAX))
        });
        Classroom {
            id: self.id,
            name: self.name,
            student_count,
        }
    }
}

impl ApiClient {
    /// `GET /api/teachers/{teacher_id}/classrooms`.
    pub(crate) async fn list_teacher_classrooms_request(
        &self,
        teacher_id: &str,
    ) -> Result<Vec<Classroom>, ApiError> {
        let path = format!(
            "/api/teachers/{}/classrooms",
            urlencoding::encode(teacher_id)
        );
        let resp = check_response(self.get(&path).send().await?).await?;
        let data: Vec<ClassroomDto> = resp.json().await?;
        Ok(data.into_iter().map(ClassroomDto::into_classroom).collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_classroom_with_count() {
        let json = r#"[{ "id": "cls-1", "name": "Physics 9A", "student_count": 27 }]"#;
        let data: Vec<ClassroomDto> = serde_json::from_str(json).unwrap();
        let classrooms: Vec<Classroom> = data
            .into_iter()
            .map(ClassroomDto::into_classroom)
            .collect();
        assert_eq!(classrooms[0].student_count, 27);
        assert_eq!(classrooms[0].name, "Physics 9A");
    }

    #[test]
    fn count_derived_from_inlined_roster() {
        let json = r#"[{ "id": "cls-2", "name": "Chem 10B", "students": [{}, {}, {}] }]"#;
        let data: Vec<ClassroomDto> = serde_json::from_str(json).unwrap();
        assert_eq!(data.into_iter().next().unwrap().into_classroom().student_count, 3);
    }

    #[test]
    fn count_defaults_to_zero() {
        let json = r#"[{ "id": "cls-3", "name": "Bio 11" }]"#;
        let data: Vec<ClassroomDto> = serde_json::from_str(json).unwrap();
        assert_eq!(data.into_iter().next().unwrap().into_classroom().student_count, 0);
    }
}

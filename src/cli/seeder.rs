//! Fake-data generation for `classbook-cli seed`.
//!
//! Records are planned up front with their ids already assigned, so every
//! reference (class → teacher, student → class and parents) is known before
//! anything is written. Writes then go through the services in dependency
//! order: teachers, classes, parents, students.

use chrono::{Duration, Utc};
use classbook_core::{DomainError, EntityKind};
use classbook_models::{
    Address, ClassId, CreateClassDto, CreateParentDto, CreateStudentDto, CreateTeacherDto,
    ParentId, StudentId, TeacherId,
};
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::services::SchoolServices;

const SECTIONS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];
const SHIFTS: [char; 3] = ['M', 'T', 'N'];
/// Number of distinct class codes (`0A-M` through `9H-N`).
pub const MAX_CLASSES: usize = 10 * SECTIONS.len() * SHIFTS.len();

const MAJORS: [&str; 8] = [
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "Geography",
    "Literature",
    "Arts",
];
const BLOOD_TYPES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];
const ALLERGIES: [&str; 5] = ["peanut", "lactose", "gluten", "dust", "pollen"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedConfig {
    pub teachers: usize,
    pub classes: usize,
    pub students_per_class: usize,
    pub parents_per_student: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            teachers: 5,
            classes: 6,
            students_per_class: 10,
            parents_per_student: 2,
        }
    }
}

/// Everything one seeding run will create.
#[derive(Debug)]
pub struct SeedPlan {
    pub teachers: Vec<CreateTeacherDto>,
    pub classes: Vec<CreateClassDto>,
    pub parents: Vec<CreateParentDto>,
    pub students: Vec<CreateStudentDto>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub teachers: usize,
    pub classes: usize,
    pub parents: usize,
    pub students: usize,
}

/// The class code at `index` in `0A-M, 0A-T, 0A-N, 0B-M, ...` order.
pub fn class_code(index: usize) -> String {
    let shift = SHIFTS[index % SHIFTS.len()];
    let section = SECTIONS[(index / SHIFTS.len()) % SECTIONS.len()];
    let grade = (index / (SHIFTS.len() * SECTIONS.len())) % 10;
    format!("{grade}{section}-{shift}")
}

fn document_for(id: Uuid) -> String {
    id.simple().to_string()[..12].to_uppercase()
}

fn pick<'a>(rng: &mut impl Rng, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

fn fake_address() -> Address {
    Address {
        street: StreetName().fake(),
        number: BuildingNumber().fake(),
        neighborhood: CityName().fake(),
        city: CityName().fake(),
        state: StateAbbr().fake(),
        country: Some("Brazil".to_string()),
        zip_code: ZipCode().fake(),
    }
}

fn fake_teacher(rng: &mut impl Rng) -> CreateTeacherDto {
    let id = TeacherId::new();
    CreateTeacherDto {
        id: Some(id),
        first_name: FirstName().fake(),
        surname: LastName().fake(),
        document: document_for(id.into_inner()),
        phone: PhoneNumber().fake(),
        email: SafeEmail().fake(),
        hiring_date: Utc::now() - Duration::days(rng.gen_range(30..3650)),
        salary: (rng.gen_range(1500.0..9000.0_f64) * 100.0).round() / 100.0,
        major: pick(rng, &MAJORS).to_string(),
    }
}

fn fake_parent(surname: &str) -> CreateParentDto {
    let id = ParentId::new();
    CreateParentDto {
        id: Some(id),
        first_name: FirstName().fake(),
        surname: surname.to_string(),
        phones: vec![PhoneNumber().fake()],
        emails: vec![SafeEmail().fake()],
        address: vec![fake_address()],
        document: document_for(id.into_inner()),
    }
}

fn fake_student(
    rng: &mut impl Rng,
    surname: &str,
    class_id: ClassId,
    parents: Vec<ParentId>,
) -> CreateStudentDto {
    let id = StudentId::new();
    let allergies = if rng.gen_bool(0.2) {
        vec![pick(rng, &ALLERGIES).to_string()]
    } else {
        Vec::new()
    };

    CreateStudentDto {
        id: Some(id),
        first_name: FirstName().fake(),
        surname: surname.to_string(),
        birth_date: Utc::now() - Duration::days(rng.gen_range(6 * 365..18 * 365)),
        document: document_for(id.into_inner()),
        blood_type: pick(rng, &BLOOD_TYPES).to_string(),
        allergies,
        medications: Vec::new(),
        start_date: Utc::now() - Duration::days(rng.gen_range(0..5 * 365)),
        class_id,
        parents,
    }
}

/// Builds the records for `config` without touching any store.
pub fn plan(config: SeedConfig) -> Result<SeedPlan, DomainError> {
    if config.classes > MAX_CLASSES {
        return Err(DomainError::bad_request(
            EntityKind::Class,
            format!("cannot seed more than {MAX_CLASSES} classes"),
        ));
    }
    if config.students_per_class > 0 && config.parents_per_student == 0 {
        return Err(DomainError::bad_request(
            EntityKind::Student,
            "every student needs at least one parent",
        ));
    }

    let mut rng = rand::thread_rng();

    let teachers: Vec<CreateTeacherDto> =
        (0..config.teachers).map(|_| fake_teacher(&mut rng)).collect();

    let classes: Vec<CreateClassDto> = (0..config.classes)
        .map(|index| CreateClassDto {
            id: Some(ClassId::new()),
            code: class_code(index),
            teacher: teachers
                .get(index % config.teachers.max(1))
                .and_then(|teacher| teacher.id),
        })
        .collect();

    let mut parents = Vec::new();
    let mut students = Vec::new();
    for class in &classes {
        let Some(class_id) = class.id else { continue };
        for _ in 0..config.students_per_class {
            let surname: String = LastName().fake();
            let family: Vec<CreateParentDto> = (0..config.parents_per_student)
                .map(|_| fake_parent(&surname))
                .collect();
            let parent_ids = family.iter().filter_map(|parent| parent.id).collect();
            students.push(fake_student(&mut rng, &surname, class_id, parent_ids));
            parents.extend(family);
        }
    }

    Ok(SeedPlan {
        teachers,
        classes,
        parents,
        students,
    })
}

/// Generates and stores fake records.
pub async fn seed(services: &SchoolServices, config: SeedConfig) -> Result<SeedSummary, DomainError> {
    let start_time = Instant::now();
    let plan = plan(config)?;
    let mut summary = SeedSummary::default();

    for dto in plan.teachers {
        services.teachers.create(dto).await?;
        summary.teachers += 1;
    }
    for dto in plan.classes {
        services.classes.create(dto).await?;
        summary.classes += 1;
    }
    for dto in plan.parents {
        services.parents.create(dto).await?;
        summary.parents += 1;
    }
    for dto in plan.students {
        services.students.create(dto).await?;
        summary.students += 1;
    }

    info!(
        teachers = summary.teachers,
        classes = summary.classes,
        parents = summary.parents,
        students = summary.students,
        elapsed_ms = %start_time.elapsed().as_millis(),
        "Seeding complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use classbook_models::classes::is_valid_class_code;
    use std::collections::HashSet;

    #[test]
    fn test_class_codes_are_valid_and_distinct() {
        let codes: HashSet<String> = (0..MAX_CLASSES).map(class_code).collect();
        assert_eq!(codes.len(), MAX_CLASSES);
        assert!(codes.iter().all(|code| is_valid_class_code(code)));
        assert_eq!(class_code(0), "0A-M");
        assert_eq!(class_code(4), "0B-T");
    }

    #[test]
    fn test_plan_wires_references() {
        let config = SeedConfig {
            teachers: 2,
            classes: 3,
            students_per_class: 2,
            parents_per_student: 2,
        };
        let plan = plan(config).unwrap();

        assert_eq!(plan.teachers.len(), 2);
        assert_eq!(plan.classes.len(), 3);
        assert_eq!(plan.students.len(), 6);
        assert_eq!(plan.parents.len(), 12);

        let class_ids: HashSet<_> = plan.classes.iter().filter_map(|c| c.id).collect();
        let parent_ids: HashSet<_> = plan.parents.iter().filter_map(|p| p.id).collect();
        for student in &plan.students {
            assert!(class_ids.contains(&student.class_id));
            assert_eq!(student.parents.len(), 2);
            assert!(student.parents.iter().all(|p| parent_ids.contains(p)));
        }
        assert!(plan.classes.iter().all(|c| c.teacher.is_some()));
    }

    #[test]
    fn test_plan_without_teachers_leaves_classes_unassigned() {
        let plan = plan(SeedConfig {
            teachers: 0,
            classes: 2,
            students_per_class: 0,
            parents_per_student: 0,
        })
        .unwrap();
        assert!(plan.classes.iter().all(|c| c.teacher.is_none()));
    }

    #[test]
    fn test_plan_rejects_too_many_classes() {
        let result = plan(SeedConfig {
            classes: MAX_CLASSES + 1,
            ..SeedConfig::default()
        });
        assert!(matches!(result, Err(DomainError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_seed_passes_integrity_checks() {
        let services = SchoolServices::memory();
        let summary = seed(&services, SeedConfig::default()).await.unwrap();

        assert_eq!(summary.teachers, 5);
        assert_eq!(summary.classes, 6);
        assert_eq!(summary.students, 60);
        assert_eq!(summary.parents, 120);
        assert_eq!(services.students.list(1, 100).await.unwrap().len(), 60);
    }
}

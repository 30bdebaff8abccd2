//! Payload builders shared by the service tests.

use chrono::{TimeZone, Utc};
use classbook_models::{
    Address, ClassId, CreateClassDto, CreateParentDto, CreateStudentDto, CreateTeacherDto,
    ParentId, TeacherId,
};

pub fn teacher_dto(document: &str) -> CreateTeacherDto {
    CreateTeacherDto {
        id: None,
        first_name: "Ada".to_string(),
        surname: "Lovelace".to_string(),
        document: document.to_string(),
        phone: "+55 41 99999-0000".to_string(),
        email: "ada@school.test".to_string(),
        hiring_date: Utc.with_ymd_and_hms(2020, 2, 1, 9, 0, 0).unwrap(),
        salary: 4200.0,
        major: "Mathematics".to_string(),
    }
}

pub fn class_dto(code: &str, teacher: Option<TeacherId>) -> CreateClassDto {
    CreateClassDto {
        id: None,
        code: code.to_string(),
        teacher,
    }
}

pub fn address() -> Address {
    Address {
        street: "Rua XV".to_string(),
        number: "100".to_string(),
        neighborhood: "Centro".to_string(),
        city: "Curitiba".to_string(),
        state: "PR".to_string(),
        country: None,
        zip_code: "80020-000".to_string(),
    }
}

pub fn parent_dto(document: &str) -> CreateParentDto {
    CreateParentDto {
        id: None,
        first_name: "Marta".to_string(),
        surname: "Souza".to_string(),
        phones: vec!["+55 41 98888-0000".to_string()],
        emails: vec!["marta@home.test".to_string()],
        address: vec![address()],
        document: document.to_string(),
    }
}

pub fn student_dto(document: &str, class_id: ClassId, parents: Vec<ParentId>) -> CreateStudentDto {
    CreateStudentDto {
        id: None,
        first_name: "Lia".to_string(),
        surname: "Souza".to_string(),
        birth_date: Utc.with_ymd_and_hms(2015, 6, 10, 0, 0, 0).unwrap(),
        document: document.to_string(),
        blood_type: "O+".to_string(),
        allergies: Vec::new(),
        medications: Vec::new(),
        start_date: Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap(),
        class_id,
        parents,
    }
}

use utoipa::OpenApi;

use classbook_core::ErrorResponse;
use classbook_models::{
    AddPhonesDto, Address, Class, CreateClassDto, CreateParentDto, CreateStudentDto,
    CreateTeacherDto, LinkParentsDto, Parent, Student, Teacher, UpdateClassDto, UpdateParentDto,
    UpdateStudentDto, UpdateTeacherDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::teachers::controller::get_teacher_classes,
        crate::modules::teachers::controller::get_teacher_students,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::classes::controller::get_class_teacher,
        crate::modules::classes::controller::get_class_students,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::get_student_parents,
        crate::modules::students::controller::link_student_parents,
        crate::modules::students::controller::unlink_student_parent,
        crate::modules::parents::controller::create_parent,
        crate::modules::parents::controller::get_parents,
        crate::modules::parents::controller::get_parent,
        crate::modules::parents::controller::update_parent,
        crate::modules::parents::controller::add_parent_phones,
        crate::modules::parents::controller::delete_parent,
        crate::modules::parents::controller::get_parent_students,
    ),
    components(
        schemas(
            ErrorResponse,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            Class,
            CreateClassDto,
            UpdateClassDto,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            LinkParentsDto,
            Parent,
            CreateParentDto,
            UpdateParentDto,
            AddPhonesDto,
            Address,
        )
    ),
    tags(
        (name = "Teachers", description = "Teacher records and the classes they teach"),
        (name = "Classes", description = "Class records, their teacher and enrolled students"),
        (name = "Students", description = "Student records and parent links"),
        (name = "Parents", description = "Parent records and their students")
    ),
    info(
        title = "Classbook API",
        version = "0.1.0",
        description = "School records (teachers, classes, students, parents) with referential integrity enforced on every write.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

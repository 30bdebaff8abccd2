//! Commands behind the `classbook-cli` binary.
//!
//! Every command goes through the same [`SchoolServices`] as the HTTP API, so
//! the reference checks are identical. Payloads are the JSON bodies the API
//! accepts, given with `--data` or typed at a prompt.

pub mod seeder;

use clap::{Args, Subcommand};
use classbook_core::DomainError;
use classbook_models::{
    ClassId, CreateClassDto, CreateParentDto, CreateStudentDto, CreateTeacherDto, ParentId,
    StudentId, TeacherId, UpdateClassDto, UpdateParentDto, UpdateStudentDto, UpdateTeacherDto,
};
use dialoguer::Input;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::services::SchoolServices;
use seeder::SeedConfig;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("invalid JSON payload: {0}")]
    Payload(#[source] serde_json::Error),
    #[error("failed to read input: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("failed to render output: {0}")]
    Output(#[source] serde_json::Error),
}

impl CliError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Domain(err) => err.code(),
            Self::Payload(_) | Self::Prompt(_) => "INVALID_INPUT",
            Self::Output(_) => "OUTPUT_ERROR",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Domain(err) => err.exit_code(),
            Self::Payload(_) | Self::Prompt(_) => 2,
            Self::Output(_) => 1,
        }
    }
}

/// JSON body of a create or update command.
#[derive(Debug, Args)]
pub struct Payload {
    /// JSON payload (prompted for when omitted)
    #[arg(short = 'd', long)]
    pub data: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, default_value = "1")]
    pub page: i64,
    #[arg(long, default_value = "20")]
    pub per_page: i64,
}

#[derive(Debug, Subcommand)]
pub enum TeacherCommand {
    /// Create a teacher from a JSON payload
    Create(Payload),
    /// List teachers
    List(ListArgs),
    /// Show one teacher
    Find { id: TeacherId },
    /// Apply a JSON patch to a teacher
    Update {
        id: TeacherId,
        #[command(flatten)]
        payload: Payload,
    },
    /// Delete a teacher that no class references
    Delete { id: TeacherId },
    /// Classes taught by the teacher
    Classes { id: TeacherId },
    /// Students in the teacher's classes
    Students { id: TeacherId },
}

#[derive(Debug, Subcommand)]
pub enum ClassCommand {
    /// Create a class from a JSON payload
    Create(Payload),
    /// List classes
    List(ListArgs),
    /// Show one class
    Find { id: ClassId },
    /// Apply a JSON patch to a class
    Update {
        id: ClassId,
        #[command(flatten)]
        payload: Payload,
    },
    /// Delete a class without students
    Delete { id: ClassId },
    /// The teacher assigned to the class
    Teacher { id: ClassId },
    /// Students enrolled in the class
    Students { id: ClassId },
}

#[derive(Debug, Subcommand)]
pub enum StudentCommand {
    /// Create a student from a JSON payload
    Create(Payload),
    /// List students
    List(ListArgs),
    /// Show one student
    Find { id: StudentId },
    /// Apply a JSON patch to a student
    Update {
        id: StudentId,
        #[command(flatten)]
        payload: Payload,
    },
    /// Delete a student
    Delete { id: StudentId },
    /// Link existing parents to the student
    Link {
        id: StudentId,
        #[arg(required = true)]
        parents: Vec<ParentId>,
    },
    /// Unlink parents from the student
    Unlink {
        id: StudentId,
        #[arg(required = true)]
        parents: Vec<ParentId>,
    },
    /// The student's parents
    Parents { id: StudentId },
}

#[derive(Debug, Subcommand)]
pub enum ParentCommand {
    /// Create a parent from a JSON payload
    Create(Payload),
    /// List parents
    List(ListArgs),
    /// Show one parent
    Find { id: ParentId },
    /// Apply a JSON patch to a parent
    Update {
        id: ParentId,
        #[command(flatten)]
        payload: Payload,
    },
    /// Delete a parent no student lists
    Delete { id: ParentId },
    /// Add phone numbers to a parent
    AddPhones {
        id: ParentId,
        #[arg(required = true)]
        phones: Vec<String>,
    },
    /// Students linked to the parent
    Students { id: ParentId },
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage teachers
    #[command(subcommand)]
    Teacher(TeacherCommand),
    /// Manage classes
    #[command(subcommand)]
    Class(ClassCommand),
    /// Manage students
    #[command(subcommand)]
    Student(StudentCommand),
    /// Manage parents
    #[command(subcommand)]
    Parent(ParentCommand),
    /// Fill the store with fake, consistent records
    Seed {
        #[arg(long, default_value = "5")]
        teachers: usize,
        #[arg(long, default_value = "6")]
        classes: usize,
        #[arg(long, default_value = "10")]
        students_per_class: usize,
        #[arg(long, default_value = "2")]
        parents_per_student: usize,
    },
}

fn read_payload<T: DeserializeOwned>(payload: Payload, prompt: &str) -> Result<T, CliError> {
    let raw = match payload.data {
        Some(data) => data,
        None => Input::<String>::new().with_prompt(prompt).interact_text()?,
    };
    serde_json::from_str(&raw).map_err(CliError::Payload)
}

fn render<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(CliError::Output)
}

fn deleted(kind: &str, id: impl std::fmt::Display) -> Result<String, CliError> {
    Ok(format!("{kind} {id} deleted"))
}

/// Runs `command` and returns what should be printed on success.
pub async fn run(services: &SchoolServices, command: Commands) -> Result<String, CliError> {
    match command {
        Commands::Teacher(command) => run_teacher(services, command).await,
        Commands::Class(command) => run_class(services, command).await,
        Commands::Student(command) => run_student(services, command).await,
        Commands::Parent(command) => run_parent(services, command).await,
        Commands::Seed {
            teachers,
            classes,
            students_per_class,
            parents_per_student,
        } => {
            let config = SeedConfig {
                teachers,
                classes,
                students_per_class,
                parents_per_student,
            };
            let summary = seeder::seed(services, config).await?;
            Ok(format!(
                "Seeded {} teachers, {} classes, {} parents, {} students",
                summary.teachers, summary.classes, summary.parents, summary.students
            ))
        }
    }
}

async fn run_teacher(services: &SchoolServices, command: TeacherCommand) -> Result<String, CliError> {
    let teachers = &services.teachers;
    match command {
        TeacherCommand::Create(payload) => {
            let dto: CreateTeacherDto = read_payload(payload, "Teacher JSON")?;
            render(&teachers.create(dto).await?)
        }
        TeacherCommand::List(args) => render(&teachers.list(args.page, args.per_page).await?),
        TeacherCommand::Find { id } => render(&teachers.find_by_id(id).await?),
        TeacherCommand::Update { id, payload } => {
            let dto: UpdateTeacherDto = read_payload(payload, "Teacher patch JSON")?;
            render(&teachers.update(id, dto).await?)
        }
        TeacherCommand::Delete { id } => {
            services.remove_teacher(id).await?;
            deleted("Teacher", id)
        }
        TeacherCommand::Classes { id } => render(&services.teacher_classes(id).await?),
        TeacherCommand::Students { id } => render(&services.teacher_students(id).await?),
    }
}

async fn run_class(services: &SchoolServices, command: ClassCommand) -> Result<String, CliError> {
    let classes = &services.classes;
    match command {
        ClassCommand::Create(payload) => {
            let dto: CreateClassDto = read_payload(payload, "Class JSON")?;
            render(&classes.create(dto).await?)
        }
        ClassCommand::List(args) => render(&classes.list(args.page, args.per_page).await?),
        ClassCommand::Find { id } => render(&classes.find_by_id(id).await?),
        ClassCommand::Update { id, payload } => {
            let dto: UpdateClassDto = read_payload(payload, "Class patch JSON")?;
            render(&classes.update(id, dto).await?)
        }
        ClassCommand::Delete { id } => {
            services.remove_class(id).await?;
            deleted("Class", id)
        }
        ClassCommand::Teacher { id } => render(&classes.get_teacher(id).await?),
        ClassCommand::Students { id } => render(&classes.get_students(id).await?),
    }
}

async fn run_student(services: &SchoolServices, command: StudentCommand) -> Result<String, CliError> {
    let students = &services.students;
    match command {
        StudentCommand::Create(payload) => {
            let dto: CreateStudentDto = read_payload(payload, "Student JSON")?;
            render(&students.create(dto).await?)
        }
        StudentCommand::List(args) => render(&students.list(args.page, args.per_page).await?),
        StudentCommand::Find { id } => render(&students.find_by_id(id).await?),
        StudentCommand::Update { id, payload } => {
            let dto: UpdateStudentDto = read_payload(payload, "Student patch JSON")?;
            render(&students.update(id, dto).await?)
        }
        StudentCommand::Delete { id } => {
            services.remove_student(id).await?;
            deleted("Student", id)
        }
        StudentCommand::Link { id, parents } => render(&students.link_parents(id, parents).await?),
        StudentCommand::Unlink { id, parents } => {
            render(&students.unlink_parents(id, parents).await?)
        }
        StudentCommand::Parents { id } => render(&students.get_parents(id).await?),
    }
}

async fn run_parent(services: &SchoolServices, command: ParentCommand) -> Result<String, CliError> {
    let parents = &services.parents;
    match command {
        ParentCommand::Create(payload) => {
            let dto: CreateParentDto = read_payload(payload, "Parent JSON")?;
            render(&parents.create(dto).await?)
        }
        ParentCommand::List(args) => render(&parents.list(args.page, args.per_page).await?),
        ParentCommand::Find { id } => render(&parents.find_by_id(id).await?),
        ParentCommand::Update { id, payload } => {
            let dto: UpdateParentDto = read_payload(payload, "Parent patch JSON")?;
            render(&parents.update(id, dto).await?)
        }
        ParentCommand::Delete { id } => {
            services.remove_parent(id).await?;
            deleted("Parent", id)
        }
        ParentCommand::AddPhones { id, phones } => render(&parents.add_phones(id, phones).await?),
        ParentCommand::Students { id } => render(&services.parent_students(id).await?),
    }
}

//! Development data seeder.
//!
//! Wipes the configured SQLite database, reapplies migrations, and fills the
//! schema with plausible users, projects, notifications, and messages.

use colored::*;
use fake::Fake;
use fake::faker::company::en::CatchPhrase;
use fake::faker::lorem::en::Paragraph;
use fake::faker::name::en::{FirstName, LastName};
use migration::run_all_migrations;
use sea_orm::DatabaseConnection;
use std::path::Path;
use util::config;

use db::models::message::Model as MessageModel;
use db::models::notification::Model as NotificationModel;
use db::models::project::{Model as ProjectModel, ProjectStatus};
use db::models::user::{Model as UserModel, Role};

const STUDENTS: usize = 8;
const SUPERVISORS: usize = 3;

#[tokio::main]
async fn main() {
    let path = config::database_path();

    if Path::new(&path).exists() {
        std::fs::remove_file(&path).expect("Failed to remove existing database");
        println!("{} {}", "Removed".yellow(), path);
    }
    if let Some(parent) = Path::new(&path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    run_all_migrations(&format!("sqlite://{path}?mode=rwc")).await;

    let db = db::connect().await;

    println!("{}", "Seeding users...".bold());
    let supervisors = seed_supervisors(&db).await;
    let students = seed_students(&db).await;

    println!("{}", "Seeding projects...".bold());
    let projects = seed_projects(&db, &students, &supervisors).await;

    println!("{}", "Seeding notifications and messages...".bold());
    seed_notifications(&db, &projects).await;
    seed_messages(&db, &students, &supervisors).await;

    println!(
        "{} {} students, {} supervisors, {} projects",
        "Done:".green().bold(),
        students.len(),
        supervisors.len(),
        projects.len()
    );
}

async fn seed_supervisors(db: &DatabaseConnection) -> Vec<UserModel> {
    let mut users = Vec::with_capacity(SUPERVISORS);
    for i in 0..SUPERVISORS {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        let user = UserModel::create(
            db,
            &format!("idp_supervisor_{i}"),
            &format!("supervisor{i}@example.com"),
            &first,
            &last,
            None,
            Role::Supervisor,
        )
        .await
        .expect("Failed to seed supervisor");
        users.push(user);
    }
    users
}

async fn seed_students(db: &DatabaseConnection) -> Vec<UserModel> {
    let mut users = Vec::with_capacity(STUDENTS);
    for i in 0..STUDENTS {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        let user = UserModel::create(
            db,
            &format!("idp_student_{i}"),
            &format!("student{i}@example.com"),
            &first,
            &last,
            None,
            Role::Student,
        )
        .await
        .expect("Failed to seed student");
        users.push(user);
    }
    users
}

async fn seed_projects(
    db: &DatabaseConnection,
    students: &[UserModel],
    supervisors: &[UserModel],
) -> Vec<ProjectModel> {
    let statuses = [
        ProjectStatus::Pending,
        ProjectStatus::UnderReview,
        ProjectStatus::Approved,
        ProjectStatus::Rejected,
    ];

    let mut projects = Vec::new();
    for student in students {
        let count = fastrand::usize(1..=3);
        for _ in 0..count {
            let supervisor = &supervisors[fastrand::usize(..supervisors.len())];
            let title: String = CatchPhrase().fake();
            let description: String = Paragraph(2..4).fake();

            let project = ProjectModel::upsert(
                db,
                None,
                &title,
                &description,
                &format!("https://files.example.com/{}.docx", fastrand::u64(..)),
                student.id,
                supervisor.id,
            )
            .await
            .expect("Failed to seed project");

            let status = statuses[fastrand::usize(..statuses.len())];
            let project = if status != ProjectStatus::Pending {
                ProjectModel::set_status(db, project.id, status, Some("Seeded feedback"))
                    .await
                    .expect("Failed to set status")
                    .expect("project exists")
            } else {
                project
            };

            // Roughly half the submissions carry a completed check.
            let project = if fastrand::bool() {
                let score = fastrand::f32() * 100.0;
                let report = serde_json::json!([
                    { "url": "https://example.com/source", "score": score }
                ]);
                ProjectModel::set_plagiarism(db, project.id, Some(score), Some(report.to_string()))
                    .await
                    .expect("Failed to set plagiarism outcome")
                    .expect("project exists")
            } else {
                project
            };

            projects.push(project);
        }
    }
    projects
}

async fn seed_notifications(db: &DatabaseConnection, projects: &[ProjectModel]) {
    for project in projects {
        match project.status {
            ProjectStatus::Approved => {
                let _ = NotificationModel::notify(
                    db,
                    project.student_id,
                    &format!("Congratulation 🎉 Your project({}) was approved", project.title),
                    Some(project.id),
                )
                .await;
            }
            ProjectStatus::Rejected => {
                let _ = NotificationModel::notify(
                    db,
                    project.student_id,
                    &format!("❌ Your project({}) was rejected", project.title),
                    Some(project.id),
                )
                .await;
            }
            _ => {}
        }

        if let Some(score) = project.plagiarism_score {
            if score > db::models::project::PLAGIARISM_ALERT_THRESHOLD {
                let _ = NotificationModel::create(
                    db,
                    project.supervisor_id,
                    &format!(
                        "Plagiarism detected! {}% similarity in {}",
                        score, project.title
                    ),
                    Some(project.id),
                )
                .await;
            }
        }
    }
}

async fn seed_messages(
    db: &DatabaseConnection,
    students: &[UserModel],
    supervisors: &[UserModel],
) {
    for student in students {
        let supervisor = &supervisors[fastrand::usize(..supervisors.len())];
        let _ = MessageModel::create(
            db,
            student.id,
            supervisor.id,
            "Hi, I submitted my project. Could you take a look?",
        )
        .await;
        let _ = MessageModel::create(
            db,
            supervisor.id,
            student.id,
            "Thanks, it's in my review queue.",
        )
        .await;
    }
}

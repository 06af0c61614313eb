use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202602100001_create_users::Migration),
            Box::new(migrations::m202602100002_create_projects::Migration),
            Box::new(migrations::m202602100003_create_notifications::Migration),
            Box::new(migrations::m202602100004_create_messages::Migration),
        ]
    }
}

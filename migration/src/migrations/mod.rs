pub mod m202602100001_create_users;
pub mod m202602100002_create_projects;
pub mod m202602100003_create_notifications;
pub mod m202602100004_create_messages;

mod auth_test;
mod dashboard_test;
mod health_test;
mod messages_test;
mod notifications_test;
mod projects_test;
mod users_test;

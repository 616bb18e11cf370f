mod helpers;
mod router_test;
mod submission_test;
mod verify_test;

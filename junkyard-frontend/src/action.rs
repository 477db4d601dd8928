use crate::task::Task;

#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    Task(Task),
}

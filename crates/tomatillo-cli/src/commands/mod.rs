pub mod activate;
pub mod add;
pub mod delete;
pub mod done;
pub mod edit;
pub mod list;
pub mod load;
pub mod report;
pub mod update;

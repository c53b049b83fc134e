mod center;
mod common;
mod dialogs;
mod icons;
mod modal;
mod side;
mod status;
mod table;
mod top;

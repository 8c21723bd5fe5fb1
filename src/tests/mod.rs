mod decode_admin;
mod decode_user;
mod update_flows;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    ProfileList,
    ProfileSet,
    RecordsList,
    RecordsAdd,
    RecordsRemove,
    RecordsEdit,
    DictionarySave,
    DictionaryReload,
    SessionStatus,
    SessionClose,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "profile.list" => Command::ProfileList,
            "profile.set" => Command::ProfileSet,
            "records.list" => Command::RecordsList,
            "records.add" => Command::RecordsAdd,
            "records.remove" => Command::RecordsRemove,
            "records.edit" => Command::RecordsEdit,
            "dictionary.save" => Command::DictionarySave,
            "dictionary.reload" => Command::DictionaryReload,
            "session.status" => Command::SessionStatus,
            "session.close" => Command::SessionClose,
            _ => Command::Unknown,
        }
    }
}

// chatsync/chatsync-core
//
// Copyright: 2024, The chatsync developers
// License: Mozilla Public License v2.0 (MPL v2.0)

use chatsync_utils::id_string;

id_string!(
    /// Server-assigned identifier of a user account.
    UserId
);

//! Windows installer generation via NSIS.
//!
//! An installer script is rendered from the credentials, then compiled with
//! `makensis` inside a staging directory. The script's install section
//! creates the user with `net user` and adds it to the Administrators
//! group; the group name is looked up at install time because it is
//! localized on non-English systems.

use std::fs;

use crate::config::Config;
use crate::error::{LscError, Result};
use crate::process::Cmd;
use crate::staging::with_staging;

const SCRIPT_NAME: &str = "p.nsi";
const ARTIFACT_NAME: &str = "p.exe";

/// Build a Windows installer that creates local user `username` with
/// `password` and adds it to the Administrators group. Returns the raw
/// executable bytes.
pub fn build(config: &Config, username: &str, password: &str) -> Result<Vec<u8>> {
    if username.is_empty() {
        return Err(LscError::invalid("username must not be empty"));
    }

    with_staging(&config.staging_base, "lsc_exe", |staging| {
        let script_path = staging.join(SCRIPT_NAME);
        let artifact = staging.join(ARTIFACT_NAME);

        let script = nsis_script(&artifact.display().to_string(), username, password);
        fs::write(&script_path, script).map_err(|e| LscError::file("write", &script_path, e))?;

        Cmd::new(&config.makensis)
            .arg_path(&script_path)
            .current_dir(staging.path())
            .error_msg("is the NSIS compiler installed?")
            .run()?;

        fs::read(&artifact).map_err(|e| LscError::file("read", &artifact, e))
    })
}

/// Render the NSIS installer script for a credential package.
///
/// Pure function of its inputs. The quoting of the embedded `cmd` lines is
/// exactly what the NSIS compiler expects; do not reformat them.
pub fn nsis_script(package_name: &str, user_name: &str, password: &str) -> String {
    format!(
        r#"#Installer filename
outfile {package_name}

# Set desktop as install directory
installDir $DESKTOP

# Put some text
BrandingText "Local Security Checks User"

#
# Default (installer) section.
#
section

# Define output path
setOutPath $INSTDIR

# Uninstaller name
writeUninstaller $INSTDIR\lsc_remove_{user_name}.exe

# Build a helper script that discovers the localized Administrators group name
ExecWait "cmd /C Echo Set objWMIService = GetObject($\"winmgmts:\\.\root\cimv2$\") > $\"%temp%\GetAdminGroupName.vbs$\" "
ExecWait "cmd /C Echo Set colAccounts = objWMIService.ExecQuery ($\"Select * From Win32_Group Where SID = 'S-1-5-32-544'$\")  >> $\"%temp%\GetAdminGroupName.vbs$\""
ExecWait "cmd /C Echo For Each objAccount in colAccounts >> $\"%temp%\GetAdminGroupName.vbs$\""
ExecWait "cmd /C Echo Wscript.Echo objAccount.Name >> $\"%temp%\GetAdminGroupName.vbs$\""
ExecWait "cmd /C Echo Next >> $\"%temp%\GetAdminGroupName.vbs$\""
ExecWait "cmd /C cscript //nologo $\"%temp%\GetAdminGroupName.vbs$\" > $\"%temp%\AdminGroupName.txt$\""

# Create batch script that installs the user
ExecWait "cmd /C Echo Set /P AdminGroupName= ^<$\"%temp%\AdminGroupName.txt$\" > $\"%temp%\AddUser.bat$\""
ExecWait "cmd /C Echo net user {user_name} {password} /add /active:yes >> $\"%temp%\AddUser.bat$\""
ExecWait "cmd /C Echo net localgroup %AdminGroupName% %COMPUTERNAME%\{user_name} /add >> $\"%temp%\AddUser.bat$\""

# Execute AddUser script
ExecWait "cmd /C $\"%temp%\AddUser.bat$\""

# Remove temporary files for localized admin group names
ExecWait "del $\"%temp%\AdminGroupName.txt$\""
ExecWait "del $\"%temp%\GetAdminGroupName.vbs$\""

ExecWait "del $\"%temp%\AddUser.bat$\""

# Display message that everything seems to be fine
messageBox MB_OK "A user has been added. An uninstaller is placed on your Desktop."

# Default (install) section end
sectionEnd

#
# Uninstaller section.
#
section "Uninstall"

# Run cmd to remove user
ExecWait "net user {user_name} /delete"

# Display message that everything seems to be fine
messageBox MB_OK "A user has been removed. You can now safely remove the uninstaller from your Desktop."

# Uninstaller section end
sectionEnd
"#
    )
}
